use harbor_model::ListChange;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkRole {
    Url,
    Title,
    Favicon,
}

impl BookmarkRole {
    pub const ALL: [BookmarkRole; 3] = [BookmarkRole::Url, BookmarkRole::Title, BookmarkRole::Favicon];

    pub fn name(&self) -> &'static str {
        match self {
            BookmarkRole::Url => "url",
            BookmarkRole::Title => "title",
            BookmarkRole::Favicon => "favicon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BookmarkEvent {
    List(ListChange<BookmarkRole>),
    /// A bookmark for this URL now exists
    Added(String),
    /// The last bookmark for this URL is gone
    Removed(String),
}

impl From<ListChange<BookmarkRole>> for BookmarkEvent {
    fn from(change: ListChange<BookmarkRole>) -> Self {
        BookmarkEvent::List(change)
    }
}
