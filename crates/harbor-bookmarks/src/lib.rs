//! Harbor Bookmarks
//!
//! Bookmark list model keyed by URL with a separate display order,
//! persisted as a JSON array in the application data directory.

mod bookmark;
mod error;
mod event;
mod file;
mod store;

pub use bookmark::Bookmark;
pub use error::BookmarkError;
pub use event::{BookmarkEvent, BookmarkRole};
pub use file::{BookmarkFile, BOOKMARKS_FILE_NAME};
pub use store::{BookmarkStore, WeakBookmarkStore};

pub type Result<T> = std::result::Result<T, BookmarkError>;
