use serde::{Deserialize, Serialize};

use crate::tab::TabId;

/// Opaque reference to the UI content that asked for a new tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHandle(pub u64);

/// A new tab request that has not been committed to the tab list yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTabData {
    pub url: String,
    pub title: String,
    pub previous_page: Option<ContentHandle>,
    pub parent_id: TabId,
}

impl NewTabData {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        previous_page: Option<ContentHandle>,
        parent_id: TabId,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            previous_page,
            parent_id,
        }
    }
}
