//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use harbor_bookmarks::BOOKMARKS_FILE_NAME;

use crate::error::CoreError;
use crate::Result;

/// Bookmarks shipped with the browser, read until the user file exists
const BUNDLED_BOOKMARKS: &str = "/usr/share/harbor/content/bookmarks.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application data directory
    pub data_dir: PathBuf,
    /// Path to the tab database file
    pub database_path: PathBuf,
    /// Writable bookmark file
    pub bookmarks_path: PathBuf,
    /// Read-only bookmark file used when `bookmarks_path` is missing
    pub default_bookmarks_path: Option<PathBuf>,
    /// Tab thumbnails
    pub thumbnail_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("harbor.db"),
            bookmarks_path: data_dir.join(BOOKMARKS_FILE_NAME),
            default_bookmarks_path: Some(PathBuf::from(BUNDLED_BOOKMARKS)),
            thumbnail_dir: data_dir.join("thumbnails"),
            data_dir,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Harbor"))
            .unwrap_or_else(|| PathBuf::from(".harbor"))
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
