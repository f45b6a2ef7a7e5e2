//! Configuration loading and path resolution
//!
//! Every setting is resolved once at startup, in priority order:
//! 1. Command-line argument or `CALVARY_*` environment variable (via clap)
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing config file is not an error: defaults apply and the caller
//! logs where it looked. A config file that exists but does not parse is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file name under the root folder
pub const DATABASE_FILE: &str = "calvary_stats.db";

/// CSV directory under the root folder
pub const DATA_DIR: &str = "data";

/// Season averages CSV file name under the data directory
pub const AVERAGES_CSV_FILE: &str = "player_season_averages.csv";

/// Season totals CSV file name under the data directory
pub const TOTALS_CSV_FILE: &str = "player_season_totals.csv";

/// Frontend bundle directory under the root folder
pub const STATIC_DIR: &str = "calvary-ui";

/// Bootstrap configuration loaded from TOML file
///
/// All fields are optional; anything left out falls back to the compiled
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Root folder holding the database, CSV data and frontend bundle
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// SQLite database file (relative paths resolve against the root folder)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Season averages CSV
    #[serde(default)]
    pub averages_csv: Option<PathBuf>,

    /// Season totals CSV
    #[serde(default)]
    pub totals_csv: Option<PathBuf>,

    /// Built frontend directory served by calvary-api
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No config file found; compiled defaults in effect
    Defaults,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from `explicit` if given, else from the default location
    ///
    /// An explicit path that does not exist is an error, since the user asked
    /// for it by name. A missing default file yields `ConfigSource::Defaults`.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok((Self::default(), ConfigSource::Defaults)),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;

        Ok((config, ConfigSource::File(path)))
    }
}

/// Default config file path for the platform (`<config_dir>/calvary/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("calvary").join("config.toml"))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("calvary"))
        .unwrap_or_else(|| PathBuf::from("./calvary_data"))
}

/// Path settings given on the command line (highest priority)
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub root_folder: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub averages_csv: Option<PathBuf>,
    pub totals_csv: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

/// Fully resolved file locations, computed once at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub averages_csv: PathBuf,
    pub totals_csv: PathBuf,
    pub static_dir: PathBuf,
}

impl ResolvedPaths {
    /// Merge command-line overrides, TOML values and defaults
    pub fn resolve(overrides: &PathOverrides, config: &TomlConfig) -> Self {
        let root_folder = overrides
            .root_folder
            .clone()
            .or_else(|| config.root_folder.clone())
            .unwrap_or_else(default_root_folder);

        let pick = |cli: &Option<PathBuf>, toml: &Option<PathBuf>, default: PathBuf| {
            cli.clone()
                .or_else(|| toml.as_ref().map(|p| root_folder.join(p)))
                .unwrap_or(default)
        };

        let data_dir = root_folder.join(DATA_DIR);

        Self {
            database_path: pick(
                &overrides.database_path,
                &config.database_path,
                root_folder.join(DATABASE_FILE),
            ),
            averages_csv: pick(
                &overrides.averages_csv,
                &config.averages_csv,
                data_dir.join(AVERAGES_CSV_FILE),
            ),
            totals_csv: pick(
                &overrides.totals_csv,
                &config.totals_csv,
                data_dir.join(TOTALS_CSV_FILE),
            ),
            static_dir: pick(
                &overrides.static_dir,
                &config.static_dir,
                root_folder.join(STATIC_DIR),
            ),
            root_folder,
        }
    }

    /// Create the directories that hold the CSV inputs, if missing
    ///
    /// Returns the directories that were newly created.
    pub fn ensure_data_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for csv in [&self.averages_csv, &self.totals_csv] {
            if let Some(dir) = csv.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    std::fs::create_dir_all(dir)?;
                    created.push(dir.to_path_buf());
                }
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(ServerConfig::default().port, 5000);
        assert_eq!(ServerConfig::default().host, "127.0.0.1");
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.root_folder.is_none());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_server_section() {
        let config = TomlConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("root_folder = [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_paths_under_root() {
        let overrides = PathOverrides {
            root_folder: Some(PathBuf::from("/srv/calvary")),
            ..Default::default()
        };
        let paths = ResolvedPaths::resolve(&overrides, &TomlConfig::default());

        assert_eq!(paths.database_path, PathBuf::from("/srv/calvary/calvary_stats.db"));
        assert_eq!(
            paths.averages_csv,
            PathBuf::from("/srv/calvary/data/player_season_averages.csv")
        );
        assert_eq!(
            paths.totals_csv,
            PathBuf::from("/srv/calvary/data/player_season_totals.csv")
        );
        assert_eq!(paths.static_dir, PathBuf::from("/srv/calvary/calvary-ui"));
    }
}
