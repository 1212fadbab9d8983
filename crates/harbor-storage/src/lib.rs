//! Harbor Storage Layer
//!
//! SQLite-backed persistence for tabs, their link history and settings.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
