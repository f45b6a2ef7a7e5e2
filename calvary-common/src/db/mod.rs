//! Database access shared by the importer and the API server

pub mod init;
pub mod rows;
pub mod schema;

pub use init::*;
pub use rows::*;
pub use schema::*;
