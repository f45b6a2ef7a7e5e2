//! Command-line arguments for calvary-import

use calvary_common::config::PathOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "calvary-import")]
#[command(about = "Load player season stats from CSV into the Calvary database")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: <config_dir>/calvary/config.toml)
    #[arg(short, long, env = "CALVARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder holding the database and data/ directory
    #[arg(short, long, env = "CALVARY_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "CALVARY_DATABASE")]
    pub database: Option<PathBuf>,

    /// Season averages CSV
    #[arg(long, env = "CALVARY_AVERAGES_CSV")]
    pub averages_csv: Option<PathBuf>,

    /// Season totals CSV
    #[arg(long, env = "CALVARY_TOTALS_CSV")]
    pub totals_csv: Option<PathBuf>,

    /// Rows per table shown in the verification report
    #[arg(long, default_value_t = 3)]
    pub verify_rows: u32,
}

impl Args {
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            root_folder: self.root_folder.clone(),
            database_path: self.database.clone(),
            averages_csv: self.averages_csv.clone(),
            totals_csv: self.totals_csv.clone(),
            static_dir: None,
        }
    }
}
