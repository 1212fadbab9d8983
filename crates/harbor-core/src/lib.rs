//! Harbor Core
//!
//! Wires the bookmark list and the tab list to their on-disk storage and
//! to each other.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use harbor_bookmarks::{Bookmark, BookmarkEvent, BookmarkFile, BookmarkRole, BookmarkStore};
pub use harbor_model::{ListChange, ListModel, RoleValue, SubscriptionId};
pub use harbor_storage::{Database, StorageError};
pub use harbor_tabs::{Tab, TabError, TabEvent, TabId, TabRole, TabStorage, TabStore};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
