//! calvary-import - Offline stats loader
//!
//! Loads `player_season_averages.csv` and `player_season_totals.csv` into the
//! Calvary SQLite database, then prints a short verification report.
//! Safe to rerun: a table that already holds data is left untouched.

use anyhow::{Context, Result};
use calvary_common::config::{ConfigSource, ResolvedPaths, TomlConfig};
use calvary_common::db::open_connection;
use calvary_import::cli::Args;
use calvary_import::{import_all, report};
use clap::Parser;
use sqlx::Connection;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing is up so the configured level can apply
    let (config, source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting Calvary stats import (calvary-import) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &source {
        ConfigSource::File(path) => info!("Configuration: {}", path.display()),
        ConfigSource::Defaults => info!("No config file found, using defaults"),
    }

    let paths = ResolvedPaths::resolve(&args.path_overrides(), &config);
    for dir in paths.ensure_data_dirs()? {
        info!("Created directory: {}", dir.display());
    }

    info!("Database: {}", paths.database_path.display());
    info!("Averages CSV: {}", paths.averages_csv.display());
    info!("Totals CSV: {}", paths.totals_csv.display());

    let mut conn = open_connection(&paths.database_path)
        .await
        .context("Failed to open database")?;

    let results = import_all(&mut conn, &paths).await;

    println!(
        "{}",
        report::render_report(&mut conn, &results, args.verify_rows).await
    );

    conn.close().await.context("Failed to close database")?;

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        error!("{} of {} imports failed", failed, results.len());
        anyhow::bail!("{} of {} imports failed", failed, results.len());
    }

    info!("Import finished");
    Ok(())
}
