//! Command-line arguments for calvary-api

use calvary_common::config::{PathOverrides, ServerConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "calvary-api")]
#[command(about = "Serve Calvary season stats and the stats frontend")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: <config_dir>/calvary/config.toml)
    #[arg(short, long, env = "CALVARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder holding the database and frontend
    #[arg(short, long, env = "CALVARY_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "CALVARY_DATABASE")]
    pub database: Option<PathBuf>,

    /// Directory with the built frontend
    #[arg(long, env = "CALVARY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "CALVARY_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CALVARY_PORT")]
    pub port: Option<u16>,
}

impl Args {
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            root_folder: self.root_folder.clone(),
            database_path: self.database.clone(),
            averages_csv: None,
            totals_csv: None,
            static_dir: self.static_dir.clone(),
        }
    }

    /// `host:port`, command line over config file
    pub fn bind_address(&self, server: &ServerConfig) -> String {
        let host = self.host.as_deref().unwrap_or(&server.host);
        let port = self.port.unwrap_or(server.port);
        format!("{}:{}", host, port)
    }
}
