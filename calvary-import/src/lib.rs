//! calvary-import library interface
//!
//! Loads player season averages and totals from CSV into SQLite. Exposed as
//! a library so the pipeline can be driven directly from integration tests.

pub mod cli;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use crate::error::{ImportError, ImportResult};
pub use crate::pipeline::{import_all, import_stats, ImportOutcome, ImportSummary, SkippedRow};
