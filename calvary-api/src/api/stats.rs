//! Season stats endpoints
//!
//! Each returns every row of one table, unfiltered and in store order.

use axum::{extract::State, routing::get, Json, Router};
use calvary_common::db::{fetch_json_rows, StatsTable};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::{ApiResult, AppState};

type JsonRows = Json<Vec<Map<String, Value>>>;

async fn list_table(db: &SqlitePool, table: StatsTable) -> ApiResult<JsonRows> {
    let sql = format!("SELECT * FROM {}", table.table_name());
    let rows = fetch_json_rows(db, &sql).await?;

    debug!("Serving {} rows from '{}'", rows.len(), table);
    Ok(Json(rows))
}

/// GET /api/player_season_averages
pub async fn get_season_averages(State(state): State<AppState>) -> ApiResult<JsonRows> {
    list_table(&state.db, StatsTable::SeasonAverages).await
}

/// GET /api/player_season_totals
pub async fn get_season_totals(State(state): State<AppState>) -> ApiResult<JsonRows> {
    list_table(&state.db, StatsTable::SeasonTotals).await
}

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/api/player_season_averages", get(get_season_averages))
        .route("/api/player_season_totals", get(get_season_totals))
}
