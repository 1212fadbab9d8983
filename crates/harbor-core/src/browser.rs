//! Main browser state container
//!
//! Owns the database and both list models, and keeps the tab list's
//! bookmarked flags bound to the bookmark list.

use std::path::PathBuf;
use std::sync::Arc;

use harbor_bookmarks::{BookmarkFile, BookmarkStore};
use harbor_storage::Database;
use harbor_tabs::{TabId, TabStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Main browser instance
#[derive(Clone)]
pub struct Browser {
    /// Configuration
    config: Config,
    /// Tab and link database
    db: Database,
    bookmarks: BookmarkStore,
    tabs: TabStore,
}

impl Browser {
    /// Open storage and build the bookmark and tab models.
    ///
    /// Nothing is loaded yet; call [`Browser::initialize`] for that.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directories exist
        std::fs::create_dir_all(&config.data_dir)?;
        std::fs::create_dir_all(&config.thumbnail_dir)?;
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;

        let mut file = BookmarkFile::new(config.bookmarks_path.clone());
        if let Some(defaults) = &config.default_bookmarks_path {
            file = file.with_defaults(defaults.clone());
        }
        let bookmarks = BookmarkStore::new(file);

        let tabs = TabStore::new(Arc::new(db.clone()));
        tabs.set_bookmark_store(&bookmarks);

        Ok(Self {
            config,
            db,
            bookmarks,
            tabs,
        })
    }

    /// Load bookmarks, then tabs, so restored tabs get their bookmarked flag
    pub async fn initialize(&self) {
        self.bookmarks.load();

        if !self.tabs.load().await {
            tracing::warn!("Starting without restored tabs");
        }

        tracing::info!(
            bookmarks = self.bookmarks.count(),
            tabs = self.tabs.count(),
            "Browser initialized"
        );
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn tabs(&self) -> &TabStore {
        &self.tabs
    }

    /// Where the thumbnail of `tab_id` is written
    pub fn thumbnail_path(&self, tab_id: TabId) -> PathBuf {
        self.config.thumbnail_dir.join(format!("tab-{tab_id}.png"))
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let defaults = dir.path().join("bundled.json");
        std::fs::write(
            &defaults,
            r#"[{"url": "https://harbor.test", "title": "Harbor", "favicon": ""}]"#,
        )
        .unwrap();

        let mut config = Config::new(dir.path().join("data"));
        config.default_bookmarks_path = Some(defaults);
        config
    }

    #[tokio::test]
    async fn test_browser_initialization() {
        let dir = TempDir::new().unwrap();
        let browser = Browser::new(test_config(&dir)).unwrap();
        assert!(browser.config().thumbnail_dir.is_dir());
        assert!(!browser.tabs().loaded());

        browser.initialize().await;

        assert!(browser.tabs().loaded());
        assert_eq!(browser.tabs().count(), 0);
        assert!(browser.bookmarks().contains("https://harbor.test"));
        assert!(browser
            .tabs()
            .bookmark_store()
            .unwrap()
            .same_store(browser.bookmarks()));
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        {
            let browser = Browser::new(config.clone()).unwrap();
            browser.initialize().await;

            browser.tabs().add_tab("https://a.test", "A");
            browser.tabs().add_tab("https://b.test", "B");
            browser.tabs().activate_tab(1);
            browser.bookmarks().add("https://a.test", "A", "");
            assert!(browser.tabs().active_tab().unwrap().bookmarked);
        }

        let browser = Browser::new(config).unwrap();
        browser.initialize().await;

        let urls: Vec<String> = browser.tabs().tabs().into_iter().map(|t| t.url).collect();
        assert_eq!(urls, vec!["https://a.test", "https://b.test"]);
        assert!(browser.tabs().active_tab().unwrap().bookmarked);
        assert!(browser.bookmarks().contains("https://harbor.test"));
        assert_eq!(browser.tabs().next_tab_id(), 3);
    }

    #[test]
    fn test_thumbnail_path() {
        let dir = TempDir::new().unwrap();
        let browser = Browser::new(test_config(&dir)).unwrap();
        assert_eq!(
            browser.thumbnail_path(7),
            dir.path().join("data").join("thumbnails").join("tab-7.png")
        );
    }
}
