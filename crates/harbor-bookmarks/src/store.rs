//! Bookmark Store
//!
//! Bookmarks are keyed by URL; a separate URL sequence gives display order.
//! Every mutation is saved to disk synchronously and published to observers
//! after the internal lock has been released.

use harbor_model::{ListChange, ListModel, Observers, RoleValue, SubscriptionId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use crate::bookmark::Bookmark;
use crate::event::{BookmarkEvent, BookmarkRole};
use crate::file::BookmarkFile;

#[derive(Default)]
struct BookmarkList {
    bookmarks: BTreeMap<String, Bookmark>,
    urls: Vec<String>,
}

impl BookmarkList {
    /// Remove the entry for `url` with its row. Returns the removed row index.
    fn take(&mut self, url: &str) -> Option<usize> {
        self.bookmarks.remove(url)?;
        let index = self.urls.iter().position(|u| u == url);
        if let Some(index) = index {
            self.urls.remove(index);
        }
        index
    }

    fn row(&self, row: usize) -> Option<&Bookmark> {
        self.urls.get(row).and_then(|url| self.bookmarks.get(url))
    }
}

struct Shared {
    list: RwLock<BookmarkList>,
    observers: Observers<BookmarkEvent>,
    file: BookmarkFile,
}

#[derive(Clone)]
pub struct BookmarkStore {
    shared: Arc<Shared>,
}

/// Non-owning handle to a [`BookmarkStore`]
#[derive(Clone, Default)]
pub struct WeakBookmarkStore {
    shared: Weak<Shared>,
}

impl WeakBookmarkStore {
    pub fn upgrade(&self) -> Option<BookmarkStore> {
        self.shared.upgrade().map(|shared| BookmarkStore { shared })
    }
}

impl BookmarkStore {
    /// Create an empty store backed by `file`. Call [`load`](Self::load) to
    /// populate it.
    pub fn new(file: BookmarkFile) -> Self {
        Self {
            shared: Arc::new(Shared {
                list: RwLock::new(BookmarkList::default()),
                observers: Observers::new(),
                file,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakBookmarkStore {
        WeakBookmarkStore {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Returns true if both handles refer to the same store
    pub fn same_store(&self, other: &BookmarkStore) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BookmarkEvent) + Send + Sync + 'static,
    {
        self.shared.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    pub fn file(&self) -> &BookmarkFile {
        &self.shared.file
    }

    /// Replace the contents with the persisted bookmarks.
    ///
    /// A missing or malformed file leaves the store empty.
    pub fn load(&self) {
        let loaded = match self.shared.file.read() {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!(error = %e, "Bookmarks not loaded");
                Vec::new()
            }
        };

        let events = {
            let mut list = self.shared.list.write();
            list.bookmarks.clear();
            list.urls.clear();

            let mut events = vec![BookmarkEvent::List(ListChange::Reset)];
            for bookmark in loaded {
                let url = bookmark.url.clone();
                if list.bookmarks.insert(url.clone(), bookmark).is_none() {
                    list.urls.push(url.clone());
                }
                events.push(BookmarkEvent::Added(url));
            }
            events.push(BookmarkEvent::List(ListChange::CountChanged));

            tracing::info!(count = list.urls.len(), "Loaded bookmarks");
            events
        };

        self.shared.observers.notify_all(&events);
    }

    /// Write the current bookmark set to disk. Failures are logged.
    pub fn save(&self) {
        let list = self.shared.list.read();
        if let Err(e) = self.shared.file.write(list.bookmarks.values()) {
            tracing::warn!(error = %e, "Bookmarks not saved");
        }
    }

    /// Add a bookmark, overwriting any existing one for `url`
    pub fn add(&self, url: &str, title: &str, favicon: &str) {
        let events = {
            let mut list = self.shared.list.write();
            let bookmark = Bookmark::new(url, title, favicon);
            let mut events: Vec<BookmarkEvent> = Vec::new();

            if list.bookmarks.insert(url.to_string(), bookmark).is_none() {
                list.urls.push(url.to_string());
                events.push(BookmarkEvent::List(ListChange::inserted(list.urls.len() - 1)));
                events.push(BookmarkEvent::List(ListChange::CountChanged));
            } else if let Some(row) = list.urls.iter().position(|u| u == url) {
                events.push(
                    ListChange::data_changed(row, vec![BookmarkRole::Title, BookmarkRole::Favicon])
                        .into(),
                );
            }
            events.push(BookmarkEvent::Added(url.to_string()));
            events
        };

        tracing::debug!(url = %url, "Added bookmark");

        self.shared.observers.notify_all(&events);
        self.save();
    }

    /// Remove the bookmark for `url`. Returns false if there was none.
    pub fn remove(&self, url: &str) -> bool {
        let removed = self.remove_unsaved(url);
        if removed {
            self.save();
        }
        removed
    }

    /// Remove every bookmark for `url`, saving once at the end
    pub fn remove_all(&self, url: &str) {
        let count = self.row_count();
        while self.remove_unsaved(url) {}

        if count != self.row_count() {
            self.save();
        }
    }

    fn remove_unsaved(&self, url: &str) -> bool {
        let events = {
            let mut list = self.shared.list.write();
            if !list.bookmarks.contains_key(url) {
                return false;
            }

            let mut events: Vec<BookmarkEvent> = Vec::new();
            if let Some(row) = list.take(url) {
                events.push(BookmarkEvent::List(ListChange::removed(row)));
            }
            events.push(BookmarkEvent::List(ListChange::CountChanged));
            if !list.bookmarks.contains_key(url) {
                events.push(BookmarkEvent::Removed(url.to_string()));
            }
            events
        };

        tracing::debug!(url = %url, "Removed bookmark");

        self.shared.observers.notify_all(&events);
        true
    }

    /// Change the URL and title of the bookmark at `index`.
    ///
    /// Out-of-range indexes are ignored. If another row already uses
    /// `url`, that row is dropped and the edited row takes the key.
    pub fn edit(&self, index: usize, url: &str, title: &str) {
        let events = {
            let mut list = self.shared.list.write();
            let Some(old_url) = list.urls.get(index).cloned() else {
                return;
            };

            let mut index = index;
            let mut events: Vec<BookmarkEvent> = Vec::new();
            let mut roles = Vec::new();

            if url != old_url {
                if let Some(other) = list.urls.iter().position(|u| u == url) {
                    list.urls.remove(other);
                    events.push(BookmarkEvent::List(ListChange::removed(other)));
                    events.push(BookmarkEvent::List(ListChange::CountChanged));
                    if other < index {
                        index -= 1;
                    }
                }

                let Some(mut bookmark) = list.bookmarks.remove(&old_url) else {
                    return;
                };
                bookmark.url = url.to_string();
                list.bookmarks.insert(url.to_string(), bookmark);
                list.urls[index] = url.to_string();
                roles.push(BookmarkRole::Url);
            }

            if let Some(bookmark) = list.bookmarks.get_mut(url) {
                if bookmark.title != title {
                    bookmark.title = title.to_string();
                    roles.push(BookmarkRole::Title);
                }
            }

            if roles.is_empty() {
                return;
            }

            let url_changed = roles.contains(&BookmarkRole::Url);
            events.push(ListChange::data_changed(index, roles).into());
            if url_changed {
                if !list.bookmarks.contains_key(&old_url) {
                    events.push(BookmarkEvent::Removed(old_url));
                }
                events.push(BookmarkEvent::Added(url.to_string()));
            }
            events
        };

        self.shared.observers.notify_all(&events);
        self.save();
    }

    pub fn contains(&self, url: &str) -> bool {
        self.shared.list.read().bookmarks.contains_key(url)
    }

    pub fn get(&self, row: usize) -> Option<Bookmark> {
        self.shared.list.read().row(row).cloned()
    }

    /// Snapshot in display order
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        let list = self.shared.list.read();
        list.urls
            .iter()
            .filter_map(|url| list.bookmarks.get(url).cloned())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.shared.list.read().bookmarks.len()
    }
}

impl ListModel for BookmarkStore {
    type Role = BookmarkRole;

    fn row_count(&self) -> usize {
        self.count()
    }

    fn data(&self, row: usize, role: BookmarkRole) -> Option<RoleValue> {
        let list = self.shared.list.read();
        let bookmark = list.row(row)?;
        let value = match role {
            BookmarkRole::Url => bookmark.url.as_str(),
            BookmarkRole::Title => bookmark.title.as_str(),
            BookmarkRole::Favicon => bookmark.favicon.as_str(),
        };
        Some(value.into())
    }

    fn role_names(&self) -> Vec<(BookmarkRole, &'static str)> {
        BookmarkRole::ALL
            .iter()
            .map(|role| (*role, role.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::fs;

    fn recorded(store: &BookmarkStore) -> Arc<Mutex<Vec<BookmarkEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event| sink.lock().push(event.clone()));
        events
    }

    fn temp_store() -> (tempfile::TempDir, BookmarkStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(BookmarkFile::in_dir(dir.path()));
        (dir, store)
    }

    #[test]
    fn test_add_and_remove() {
        let (_dir, store) = temp_store();
        let events = recorded(&store);

        store.add("https://x.test", "X", "icon1");
        assert!(store.contains("https://x.test"));
        assert_eq!(store.row_count(), 1);

        assert!(store.remove("https://x.test"));
        assert_eq!(store.row_count(), 0);
        assert!(!store.contains("https://x.test"));
        assert!(!store.remove("https://x.test"));

        let removed = events
            .lock()
            .iter()
            .filter(|e| matches!(e, BookmarkEvent::Removed(url) if url == "https://x.test"))
            .count();
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_add_emits_row_inserted() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "");
        let events = recorded(&store);

        store.add("https://b.test", "B", "");
        assert_eq!(
            *events.lock(),
            vec![
                BookmarkEvent::List(ListChange::RowsInserted { first: 1, last: 1 }),
                BookmarkEvent::List(ListChange::CountChanged),
                BookmarkEvent::Added("https://b.test".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_existing_url_overwrites() {
        let (_dir, store) = temp_store();
        store.add("https://x.test", "X", "icon1");
        store.add("https://y.test", "Y", "");
        store.add("https://x.test", "X2", "icon2");

        assert_eq!(store.row_count(), 2);
        let first = store.get(0).unwrap();
        assert_eq!(first.title, "X2");
        assert_eq!(first.favicon, "icon2");
        assert_eq!(
            store.data(0, BookmarkRole::Title),
            Some(RoleValue::Text("X2".to_string()))
        );
    }

    #[test]
    fn test_contains_tracks_mutations() {
        let (_dir, store) = temp_store();
        let urls = ["https://a.test", "https://b.test", "https://c.test"];

        for url in urls {
            store.add(url, "", "");
        }
        store.remove("https://b.test");
        store.add("https://b.test", "again", "");
        store.remove("https://a.test");

        assert!(!store.contains("https://a.test"));
        assert!(store.contains("https://b.test"));
        assert!(store.contains("https://c.test"));

        let order: Vec<String> = store.bookmarks().into_iter().map(|b| b.url).collect();
        assert_eq!(order, vec!["https://c.test", "https://b.test"]);
    }

    #[test]
    fn test_remove_all_saves_once_when_changed() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "");
        store.add("https://b.test", "B", "");

        store.remove_all("https://a.test");
        assert_eq!(store.row_count(), 1);
        assert!(!store.contains("https://a.test"));

        let saved = store.file().read().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].url, "https://b.test");

        store.remove_all("https://missing.test");
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn test_edit_out_of_range_is_noop() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "");
        let before = fs::read(store.file().path()).unwrap();
        let events = recorded(&store);

        store.edit(1, "https://z.test", "Z");
        store.edit(99, "https://z.test", "Z");

        assert!(events.lock().is_empty());
        assert_eq!(store.bookmarks(), vec![Bookmark::new("https://a.test", "A", "")]);
        assert_eq!(fs::read(store.file().path()).unwrap(), before);
    }

    #[test]
    fn test_edit_rekeys_bookmark() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "a.png");
        store.add("https://b.test", "B", "");
        let events = recorded(&store);

        store.edit(0, "https://c.test", "C");

        assert!(!store.contains("https://a.test"));
        assert!(store.contains("https://c.test"));
        let edited = store.get(0).unwrap();
        assert_eq!(edited.url, "https://c.test");
        assert_eq!(edited.title, "C");
        assert_eq!(edited.favicon, "a.png");
        assert_eq!(edited.original_url, "https://a.test");

        assert_eq!(
            *events.lock(),
            vec![
                BookmarkEvent::List(ListChange::DataChanged {
                    row: 0,
                    roles: vec![BookmarkRole::Url, BookmarkRole::Title],
                }),
                BookmarkEvent::Removed("https://a.test".to_string()),
                BookmarkEvent::Added("https://c.test".to_string()),
            ]
        );
    }

    #[test]
    fn test_edit_title_only() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "");
        let events = recorded(&store);

        store.edit(0, "https://a.test", "A");
        assert!(events.lock().is_empty());

        store.edit(0, "https://a.test", "Renamed");
        assert_eq!(
            *events.lock(),
            vec![BookmarkEvent::List(ListChange::DataChanged {
                row: 0,
                roles: vec![BookmarkRole::Title],
            })]
        );
    }

    #[test]
    fn test_edit_onto_existing_url_drops_other_row() {
        let (_dir, store) = temp_store();
        store.add("https://a.test", "A", "");
        store.add("https://b.test", "B", "");
        store.add("https://c.test", "C", "");

        store.edit(2, "https://a.test", "C moved");

        assert_eq!(store.row_count(), 2);
        let order: Vec<(String, String)> = store
            .bookmarks()
            .into_iter()
            .map(|b| (b.url, b.title))
            .collect();
        assert_eq!(
            order,
            vec![
                ("https://b.test".to_string(), "B".to_string()),
                ("https://a.test".to_string(), "C moved".to_string()),
            ]
        );
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let (dir, store) = temp_store();
        store.add("https://b.test", "B", "b.png");
        store.add("https://a.test", "A", "a.png");
        store.edit(1, "https://c.test", "C");

        let reloaded = BookmarkStore::new(BookmarkFile::in_dir(dir.path()));
        reloaded.load();

        let mut expected = store.bookmarks();
        let mut actual = reloaded.bookmarks();
        expected.sort_by(|a, b| a.url.cmp(&b.url));
        actual.sort_by(|a, b| a.url.cmp(&b.url));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_load_malformed_file_yields_empty_store() {
        let (_dir, store) = temp_store();
        fs::write(store.file().path(), "{ not json").unwrap();
        let events = recorded(&store);

        store.load();

        assert_eq!(store.row_count(), 0);
        assert_eq!(
            *events.lock(),
            vec![
                BookmarkEvent::List(ListChange::Reset),
                BookmarkEvent::List(ListChange::CountChanged),
            ]
        );
    }

    #[test]
    fn test_load_emits_added_per_bookmark() {
        let (_dir, store) = temp_store();
        fs::write(
            store.file().path(),
            r#"[{"url":"https://a.test","title":"A","favicon":"","originalUrl":"https://a.test"},
                {"url":"https://b.test","title":"B","favicon":"","originalUrl":"https://b.test"}]"#,
        )
        .unwrap();
        let events = recorded(&store);

        store.load();

        assert_eq!(store.row_count(), 2);
        let added: Vec<String> = events
            .lock()
            .iter()
            .filter_map(|e| match e {
                BookmarkEvent::Added(url) => Some(url.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(added, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = BookmarkStore::new(BookmarkFile::in_dir(blocker.join("data")));

        store.add("https://x.test", "X", "");

        assert!(store.contains("https://x.test"));
        assert_eq!(store.row_count(), 1);
        assert!(!blocker.join("data").exists());
    }

    #[test]
    fn test_role_names() {
        let (_dir, store) = temp_store();
        let names: Vec<&str> = store.role_names().into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["url", "title", "favicon"]);
        assert_eq!(store.data(0, BookmarkRole::Url), None);
    }

    #[test]
    fn test_weak_handle_does_not_keep_store_alive() {
        let (_dir, store) = temp_store();
        let weak = store.downgrade();
        assert!(weak.upgrade().unwrap().same_store(&store));

        drop(store);
        assert!(weak.upgrade().is_none());
    }
}
