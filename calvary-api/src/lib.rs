//! calvary-api library - Read API and frontend server
//!
//! Serves the imported season stats as JSON, two fixed demo payloads, and the
//! built frontend bundle. The database is only ever read.

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Directory holding the built frontend (`index.html` and assets)
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(db: SqlitePool, static_dir: PathBuf) -> Self {
        Self { db, static_dir }
    }
}

/// Build application router
///
/// Anything not matched by an API route is looked up under the static
/// directory, falling back to `index.html` for client-side routes.
pub fn build_router(state: AppState) -> Router {
    let frontend = api::frontend_service(&state.static_dir);

    Router::new()
        .merge(api::stats_routes())
        .merge(api::fixed_routes())
        .merge(api::health_routes())
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
