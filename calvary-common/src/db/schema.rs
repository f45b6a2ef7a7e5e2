//! Stats table schemas
//!
//! Single source of truth for both destination tables. Each table is declared
//! once as a slice of [`ColumnDefinition`]s; `CREATE TABLE`, `INSERT` and the
//! importer's row normalizer are all derived from that declaration.
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS` and are never dropped
//! or altered.

use crate::Result;
use sqlx::SqliteConnection;
use std::fmt;
use tracing::debug;

/// How a raw CSV string becomes a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Player name: trimmed, rank/jersey prefix removed, must be non-empty
    Name,
    /// Floating point statistic
    Real,
    /// Integer statistic
    Integer,
    /// Floating point with an optional trailing `%`
    Percentage,
}

/// One stored column and the CSV header it is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name in the database
    pub name: &'static str,
    /// SQL type clause, including constraints
    pub sql_type: &'static str,
    /// Exact CSV header spelling
    pub source_header: &'static str,
    pub kind: ValueKind,
}

const fn column(
    name: &'static str,
    sql_type: &'static str,
    source_header: &'static str,
    kind: ValueKind,
) -> ColumnDefinition {
    ColumnDefinition {
        name,
        sql_type,
        source_header,
        kind,
    }
}

/// `player_season_averages`: every statistic stored as REAL
pub const AVERAGES_COLUMNS: &[ColumnDefinition] = &[
    column("player", "TEXT NOT NULL", "Player", ValueKind::Name),
    column("pts", "REAL", "PTS", ValueKind::Real),
    column("rebs", "REAL", "REBS", ValueKind::Real),
    column("assists", "REAL", "ASSISTS", ValueKind::Real),
    column("steals", "REAL", "STEALS", ValueKind::Real),
    column("blocks", "REAL", "BLOCKS", ValueKind::Real),
    column("two_pt_m", "REAL", "2 PTM", ValueKind::Real),
    column("two_pt_a", "REAL", "2 PTA", ValueKind::Real),
    column("two_pt_pct", "REAL", "2 PT %", ValueKind::Percentage),
    column("three_pt_m", "REAL", "3 PTM", ValueKind::Real),
    column("three_pt_a", "REAL", "3 PTA", ValueKind::Real),
    column("three_pt_pct", "REAL", "3 PT %", ValueKind::Percentage),
    column("fgm", "REAL", "FGM", ValueKind::Real),
    column("fga", "REAL", "FGA", ValueKind::Real),
    column("fg_pct", "REAL", "FG %", ValueKind::Percentage),
    column("ftm", "REAL", "FTM", ValueKind::Real),
    column("fta", "REAL", "FTA", ValueKind::Real),
    column("ft_pct", "REAL", "FT %", ValueKind::Percentage),
    // TO is an SQL keyword
    column("to_val", "REAL", "TO", ValueKind::Real),
];

/// `player_season_totals`: counting stats as INTEGER, percentages as REAL
pub const TOTALS_COLUMNS: &[ColumnDefinition] = &[
    column("player", "TEXT NOT NULL", "Players", ValueKind::Name),
    column("pts", "INTEGER", "PTS", ValueKind::Integer),
    column("rebs", "INTEGER", "REBS", ValueKind::Integer),
    column("assists", "INTEGER", "ASSISTS", ValueKind::Integer),
    column("steals", "INTEGER", "STEALS", ValueKind::Integer),
    column("blocks", "INTEGER", "BLOCKS", ValueKind::Integer),
    column("two_pt_m", "INTEGER", "2 PTM", ValueKind::Integer),
    column("two_pt_a", "INTEGER", "2 PTA", ValueKind::Integer),
    column("two_pt_pct", "REAL", "2 PT %", ValueKind::Percentage),
    column("three_pt_m", "INTEGER", "3 PTM", ValueKind::Integer),
    column("three_pt_a", "INTEGER", "3 PTA", ValueKind::Integer),
    column("three_pt_pct", "REAL", "3 PT %", ValueKind::Percentage),
    column("fgm", "INTEGER", "FGM", ValueKind::Integer),
    column("fga", "INTEGER", "FGA", ValueKind::Integer),
    column("fg_pct", "REAL", "FG %", ValueKind::Percentage),
    column("ftm", "INTEGER", "FTM", ValueKind::Integer),
    column("fta", "INTEGER", "FTA", ValueKind::Integer),
    column("ft_pct", "REAL", "FT %", ValueKind::Percentage),
    column("to_val", "INTEGER", "TO", ValueKind::Integer),
    column("games", "INTEGER", "Games", ValueKind::Integer),
];

/// The two destination tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsTable {
    /// Per-game season averages
    SeasonAverages,
    /// Cumulative season totals plus games played
    SeasonTotals,
}

impl StatsTable {
    pub const ALL: [StatsTable; 2] = [StatsTable::SeasonAverages, StatsTable::SeasonTotals];

    pub fn table_name(self) -> &'static str {
        match self {
            StatsTable::SeasonAverages => "player_season_averages",
            StatsTable::SeasonTotals => "player_season_totals",
        }
    }

    /// Stored columns in insertion order, excluding the auto-assigned `id`
    pub fn columns(self) -> &'static [ColumnDefinition] {
        match self {
            StatsTable::SeasonAverages => AVERAGES_COLUMNS,
            StatsTable::SeasonTotals => TOTALS_COLUMNS,
        }
    }

    /// CSV header carrying the player name (`Player` vs `Players`)
    pub fn name_header(self) -> &'static str {
        self.columns()
            .iter()
            .find(|c| c.kind == ValueKind::Name)
            .map(|c| c.source_header)
            .unwrap_or("Player")
    }

    pub fn create_table_sql(self) -> String {
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT",
            self.table_name()
        );
        for col in self.columns() {
            sql.push_str(&format!(",\n    {} {}", col.name, col.sql_type));
        }
        sql.push_str("\n)");
        sql
    }

    pub fn insert_sql(self) -> String {
        let columns = self.columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name(),
            names.join(", "),
            placeholders
        )
    }
}

impl fmt::Display for StatsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Create `table` if absent; a no-op otherwise
///
/// Runs on the bare connection, outside any transaction, so the change is
/// persisted before this returns.
pub async fn ensure_table(conn: &mut SqliteConnection, table: StatsTable) -> Result<()> {
    sqlx::query(&table.create_table_sql())
        .execute(&mut *conn)
        .await?;

    debug!("Table '{}' checked/created", table);
    Ok(())
}

pub async fn table_exists(conn: &mut SqliteConnection, table: StatsTable) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(table.table_name())
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}

pub async fn row_count(conn: &mut SqliteConnection, table: StatsTable) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.table_name()))
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
