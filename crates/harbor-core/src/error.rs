//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] harbor_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] harbor_tabs::TabError),

    #[error("Bookmark error: {0}")]
    Bookmark(#[from] harbor_bookmarks::BookmarkError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
