use harbor_model::ListChange;
use serde::Serialize;

use crate::tab::TabId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TabRole {
    ThumbnailPath,
    Title,
    Url,
    TabId,
    Favicon,
    Bookmarked,
}

impl TabRole {
    pub const ALL: [TabRole; 6] = [
        TabRole::ThumbnailPath,
        TabRole::Title,
        TabRole::Url,
        TabRole::TabId,
        TabRole::Favicon,
        TabRole::Bookmarked,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TabRole::ThumbnailPath => "thumbnailPath",
            TabRole::Title => "title",
            TabRole::Url => "url",
            TabRole::TabId => "tabId",
            TabRole::Favicon => "favicon",
            TabRole::Bookmarked => "favorited",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TabEvent {
    List(ListChange<TabRole>),
    TabAdded(TabId),
    TabClosed(TabId),
    TabsCleared,
    /// `new` is 0 when the last tab was closed
    ActiveTabChanged { old: TabId, new: TabId },
    NextTabIdChanged(TabId),
    LoadedChanged,
    BrowsingChanged,
    /// Browsing resumed; the active tab's thumbnail should be refreshed
    UpdateActiveThumbnail,
    NewTabRequested { url: String, title: String },
    NewTabUrlChanged,
    HasNewTabDataChanged,
    BookmarkStoreChanged,
}

impl From<ListChange<TabRole>> for TabEvent {
    fn from(change: ListChange<TabRole>) -> Self {
        TabEvent::List(change)
    }
}
