use serde::{Deserialize, Serialize};

/// Favicon forced onto bookmarks saved by early releases for the vendor's
/// own pages, which were stored without a usable icon.
pub(crate) const VENDOR_FAVICON: &str = "image://theme/icon-m-service-jolla";

const VENDOR_PLAYLIST_URL: &str =
    "http://m.youtube.com/playlist?list=PLQgR2jhO_J0y8YSSvVd-Mg9LM88W0aIpD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub favicon: String,
    /// URL the bookmark was created with, kept across edits
    #[serde(default)]
    pub original_url: String,
}

impl Bookmark {
    pub fn new(url: impl Into<String>, title: impl Into<String>, favicon: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: title.into(),
            original_url: url.clone(),
            url,
            favicon: favicon.into(),
        }
    }

    /// Apply the load-time favicon override for vendor pages
    pub(crate) fn apply_compat_favicon(&mut self) {
        if is_vendor_url(&self.url) {
            self.favicon = VENDOR_FAVICON.to_string();
        }
    }
}

fn is_vendor_url(url: &str) -> bool {
    if url.starts_with(VENDOR_PLAYLIST_URL) {
        return true;
    }

    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };

    rest.strip_prefix("together.")
        .unwrap_or(rest)
        .starts_with("jolla.com")
}
