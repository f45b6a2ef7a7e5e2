//! Error types for calvary-import
//!
//! Only file-level and storage-level failures are errors. Per-row data
//! problems are skipped and reported in the import summary instead.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure of one file's import
#[derive(Debug, Error)]
pub enum ImportError {
    /// Source CSV does not exist
    #[error("CSV file not found at '{}'", .0.display())]
    SourceNotFound(PathBuf),

    /// Source CSV exists but could not be opened
    #[error("Failed to open '{}': {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV could not be read past this point (I/O failure, unreadable header)
    #[error("CSV error in '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// Storage-engine failure during insert or commit
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage-engine failure from the shared schema layer
    #[error(transparent)]
    Common(#[from] calvary_common::Error),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
