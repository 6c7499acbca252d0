//! Nimbus Storage Layer
//!
//! SQLite-based persistence for the pieces of state that survive a page
//! reload: the settings key/value surface and the navigation history log.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
