//! calvary-api - Season stats server
//!
//! Serves the imported season averages and totals as JSON, plus the built
//! frontend. Database access is read-only; run calvary-import to load data.

use anyhow::{Context, Result};
use calvary_api::cli::Args;
use calvary_api::{api, build_router, AppState};
use calvary_common::config::{ConfigSource, ResolvedPaths, TomlConfig};
use calvary_common::db::connect_readonly;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting Calvary stats server (calvary-api) v{} [{}] built {} ({})",
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
    info!("Database path: {}", paths.database_path.display());
    info!("Static directory: {}", paths.static_dir.display());

    if !paths.static_dir.join(api::frontend::INDEX_FILE).exists() {
        warn!(
            "No {} in {}; frontend requests will return 404",
            api::frontend::INDEX_FILE,
            paths.static_dir.display()
        );
    }

    let pool = connect_readonly(&paths.database_path);
    let state = AppState::new(pool.clone(), paths.static_dir.clone());
    let app = build_router(state);

    let addr = args.bind_address(&config.server);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("calvary-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
