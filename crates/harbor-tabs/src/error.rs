//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] harbor_storage::StorageError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Row id out of range: {0}")]
    IdOutOfRange(i64),

    #[error("Tab delivery dropped before completion")]
    DeliveryDropped,
}
