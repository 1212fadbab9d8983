//! Bookmark file persistence
//!
//! The writable file lives in the application data directory. A read-only
//! defaults file shipped with the browser seeds first runs.

use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::bookmark::Bookmark;
use crate::error::BookmarkError;
use crate::Result;

pub const BOOKMARKS_FILE_NAME: &str = "bookmarks.json";

#[derive(Debug, Clone)]
pub struct BookmarkFile {
    path: PathBuf,
    defaults: Option<PathBuf>,
}

impl BookmarkFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: None,
        }
    }

    /// `bookmarks.json` inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(BOOKMARKS_FILE_NAME))
    }

    pub fn with_defaults(mut self, defaults: impl Into<PathBuf>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> Option<&Path> {
        self.defaults.as_deref()
    }

    /// Read bookmarks from the writable file, falling back to the defaults.
    ///
    /// Array items that are not objects are skipped. The vendor favicon
    /// override is applied to every entry.
    pub fn read(&self) -> Result<Vec<Bookmark>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unable to open bookmarks");
                self.read_defaults()?
            }
        };

        let Value::Array(items) = serde_json::from_str::<Value>(&contents)? else {
            return Err(BookmarkError::NotAnArray);
        };

        let bookmarks = items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value::<Bookmark>(item) {
                Ok(bookmark) => Some(bookmark),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable bookmark entry");
                    None
                }
            })
            .map(|mut bookmark| {
                bookmark.apply_compat_favicon();
                bookmark
            })
            .collect();

        Ok(bookmarks)
    }

    fn read_defaults(&self) -> Result<String> {
        let Some(defaults) = self.defaults.as_ref() else {
            return Err(BookmarkError::Open {
                path: self.path.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        };

        fs::read_to_string(defaults).map_err(|source| BookmarkError::Open {
            path: defaults.clone(),
            source,
        })
    }

    /// Write the full bookmark set, creating the parent directory if needed
    pub fn write<'a, I>(&self, bookmarks: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Bookmark>,
    {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| BookmarkError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|source| BookmarkError::CreateFile {
            path: self.path.clone(),
            source,
        })?;

        let items: Vec<&Bookmark> = bookmarks.into_iter().collect();
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &items)?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|source| BookmarkError::CreateFile {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::VENDOR_FAVICON;

    #[test]
    fn test_write_creates_directory_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = BookmarkFile::in_dir(dir.path().join("nested").join("data"));

        let bookmarks = vec![
            Bookmark::new("https://a.test", "A", "a.png"),
            Bookmark::new("https://b.test", "B", ""),
        ];
        file.write(&bookmarks).unwrap();

        assert_eq!(file.read().unwrap(), bookmarks);
    }

    #[test]
    fn test_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let defaults = dir.path().join("defaults.json");
        fs::write(
            &defaults,
            r#"[{"url":"https://jolla.com","title":"Jolla","favicon":"x","originalUrl":"https://jolla.com"}]"#,
        )
        .unwrap();

        let file = BookmarkFile::in_dir(dir.path().join("data")).with_defaults(&defaults);
        let bookmarks = file.read().unwrap();

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].favicon, VENDOR_FAVICON);
    }

    #[test]
    fn test_missing_files_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = BookmarkFile::in_dir(dir.path()).with_defaults(dir.path().join("nope.json"));

        assert!(matches!(file.read(), Err(BookmarkError::Open { .. })));
    }

    #[test]
    fn test_non_array_document_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = BookmarkFile::in_dir(dir.path());
        fs::write(file.path(), r#"{"url":"https://a.test"}"#).unwrap();

        assert!(matches!(file.read(), Err(BookmarkError::NotAnArray)));
    }

    #[test]
    fn test_non_object_items_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = BookmarkFile::in_dir(dir.path());
        fs::write(
            file.path(),
            r#"[1, "text", {"url":"https://a.test","title":"A"}]"#,
        )
        .unwrap();

        let bookmarks = file.read().unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "https://a.test");
        assert_eq!(bookmarks[0].favicon, "");
        assert_eq!(bookmarks[0].original_url, "");
    }
}
