//! Tab data structure
//!
//! A tab points at its current entry in the link history kept by storage,
//! plus the neighbouring entries used for back/forward navigation.

use serde::{Deserialize, Serialize};

pub type TabId = i32;
pub type LinkId = i32;

/// Id carried by a tab that is being torn down
pub const INVALID_TAB_ID: TabId = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_id: TabId,
    pub current_link: LinkId,
    pub previous_link: LinkId,
    pub next_link: LinkId,
    pub url: String,
    pub title: String,
    pub thumbnail_path: String,
    pub favorite_icon: String,
    /// Whether the bookmark store has an entry for `url`
    pub bookmarked: bool,
}

impl Tab {
    pub fn new(tab_id: TabId, link_id: LinkId, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tab_id,
            current_link: link_id,
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.tab_id != INVALID_TAB_ID
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.previous_link > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.next_link > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab() {
        let tab = Tab::new(4, 9, "https://example.com", "");
        assert_eq!(tab.tab_id, 4);
        assert_eq!(tab.current_link, 9);
        assert!(tab.is_valid());
        assert!(!tab.bookmarked);
        assert!(!tab.can_go_back());
        assert_eq!(tab.display_title(), "https://example.com");
    }

    #[test]
    fn test_invalidated_tab() {
        let mut tab = Tab::new(4, 9, "https://example.com", "Example");
        tab.tab_id = INVALID_TAB_ID;
        assert!(!tab.is_valid());
        assert_eq!(tab.display_title(), "Example");
    }
}
