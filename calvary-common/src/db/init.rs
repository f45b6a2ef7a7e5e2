//! Database open
//!
//! The importer holds a single read-write connection for the length of a run.
//! The API server only ever reads, through a read-only pool.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::Path;
use tracing::{info, warn};

/// Open (creating if needed) the database for writing
///
/// Creates the parent directory when missing. The caller owns the returned
/// connection and drops it when the run ends.
pub async fn open_connection(db_path: &Path) -> Result<SqliteConnection> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .connect()
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    Ok(conn)
}

/// Build a read-only pool for serving
///
/// Connections are opened lazily so the server can start (and serve the
/// frontend) before the importer has created the database. Queries against a
/// missing database fail at request time.
pub fn connect_readonly(db_path: &Path) -> SqlitePool {
    if !db_path.exists() {
        warn!(
            "Database not found: {} (run calvary-import to create it)",
            db_path.display()
        );
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    SqlitePoolOptions::new().connect_lazy_with(options)
}
