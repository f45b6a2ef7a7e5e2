//! # Calvary Common Library
//!
//! Shared code for the Calvary stats binaries:
//! - Configuration loading and path resolution
//! - Database open and table schemas
//! - Row-to-JSON conversion at the store boundary

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
