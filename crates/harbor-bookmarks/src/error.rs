//! Bookmark error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("Unable to open bookmarks {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Can't create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Can't create file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Bookmarks file should be an array of items")]
    NotAnArray,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
