//! Tab Store
//!
//! Ordered tab list where position 0 is always the active tab. Tabs and
//! their link history are persisted through [`TabStorage`]; only the
//! display order is kept as a setting. Change events are published after
//! the internal lock has been released.

use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::{Arc, Weak};

use harbor_bookmarks::{BookmarkEvent, BookmarkStore, WeakBookmarkStore};
use harbor_model::{ListChange, ListModel, Observers, RoleValue, SubscriptionId};

use crate::error::TabError;
use crate::event::{TabEvent, TabRole};
use crate::link;
use crate::new_tab::{ContentHandle, NewTabData};
use crate::order::{TabOrder, TAB_ORDER_KEY};
use crate::storage::TabStorage;
use crate::tab::{LinkId, Tab, TabId, INVALID_TAB_ID};

struct TabList {
    tabs: Vec<Tab>,
    next_tab_id: TabId,
    loaded: bool,
    browsing: bool,
    new_tab_data: Option<NewTabData>,
    order: TabOrder,
}

impl TabList {
    fn index_of(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.tab_id == tab_id)
    }

    fn pending_new_tab(&self) -> Option<&NewTabData> {
        self.new_tab_data.as_ref().filter(|data| !data.url.is_empty())
    }
}

struct BookmarkBinding {
    store: WeakBookmarkStore,
    subscription: SubscriptionId,
}

struct Shared {
    list: RwLock<TabList>,
    observers: Observers<TabEvent>,
    storage: Arc<dyn TabStorage>,
    navigable: fn(&str) -> bool,
    bookmarks: Mutex<Option<BookmarkBinding>>,
}

impl Shared {
    fn bookmark_store(&self) -> Option<BookmarkStore> {
        self.bookmarks
            .lock()
            .as_ref()
            .and_then(|binding| binding.store.upgrade())
    }

    /// Run a mutation under the write lock, then publish its events
    fn edit<T>(&self, f: impl FnOnce(&mut TabEdit<'_>) -> T) -> T {
        let bookmarks = self.bookmark_store();
        let (result, events) = {
            let mut list = self.list.write();
            let mut edit = TabEdit {
                list: &mut *list,
                storage: self.storage.as_ref(),
                navigable: self.navigable,
                bookmarks,
                events: Vec::new(),
            };
            let result = f(&mut edit);
            (result, edit.events)
        };

        self.observers.notify_all(&events);
        result
    }
}

#[derive(Clone)]
pub struct TabStore {
    shared: Arc<Shared>,
}

impl TabStore {
    pub fn new(storage: Arc<dyn TabStorage>) -> Self {
        Self::with_link_validator(storage, link::is_navigable)
    }

    /// Create a store that uses `navigable` to decide which URLs may open
    pub fn with_link_validator(storage: Arc<dyn TabStorage>, navigable: fn(&str) -> bool) -> Self {
        let next_tab_id = match storage.max_tab_id() {
            Ok(max) => max + 1,
            Err(e) => {
                tracing::warn!(error = %e, "Unable to read max tab id");
                1
            }
        };

        Self {
            shared: Arc::new(Shared {
                list: RwLock::new(TabList {
                    tabs: Vec::new(),
                    next_tab_id,
                    loaded: false,
                    browsing: false,
                    new_tab_data: None,
                    order: TabOrder::default(),
                }),
                observers: Observers::new(),
                storage,
                navigable,
                bookmarks: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.shared.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    // === Loading ===

    /// Request the persisted tabs and wait for their delivery.
    ///
    /// Returns false if storage failed; the store then stays unloaded.
    pub async fn load(&self) -> bool {
        let delivery = self.shared.storage.all_tabs();
        match delivery.await.unwrap_or(Err(TabError::DeliveryDropped)) {
            Ok(tabs) => {
                self.tabs_available(tabs);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unable to load tabs");
                false
            }
        }
    }

    /// Replace the model with tabs delivered by storage
    pub fn tabs_available(&self, tabs: Vec<Tab>) {
        self.shared.edit(|edit| edit.tabs_available(tabs));
    }

    /// Storage-side update of a whole tab, matched by id
    pub fn tab_changed(&self, tab: Tab) {
        self.shared.edit(|edit| edit.tab_changed(tab));
    }

    // === Tab operations ===

    /// Open `url` as the new active tab. Returns false if the URL is not
    /// navigable or storage could not allocate the tab.
    pub fn add_tab(&self, url: &str, title: &str) -> bool {
        self.shared.edit(|edit| edit.add_tab(url, title))
    }

    pub fn remove(&self, index: usize) {
        self.shared.edit(|edit| edit.remove(index));
    }

    pub fn remove_tab_by_id(&self, tab_id: TabId, is_active: bool) {
        self.shared.edit(|edit| {
            if is_active {
                edit.close_active_tab();
            } else if let Some(index) = edit.list.index_of(tab_id) {
                edit.remove(index);
            }
        });
    }

    pub fn close_active_tab(&self) {
        self.shared.edit(|edit| edit.close_active_tab());
    }

    pub fn clear(&self) {
        self.shared.edit(|edit| edit.clear());
    }

    /// Move the tab at `index` to the front
    pub fn activate_tab(&self, index: usize) -> bool {
        self.shared.edit(|edit| edit.activate_tab(index))
    }

    pub fn activate_tab_by_url(&self, url: &str) -> bool {
        self.shared.edit(|edit| {
            match edit.list.tabs.iter().position(|tab| tab.url == url) {
                Some(index) => edit.activate_tab(index),
                None => false,
            }
        })
    }

    pub fn activate_tab_by_id(&self, tab_id: TabId) -> bool {
        self.shared.edit(|edit| match edit.list.index_of(tab_id) {
            Some(index) => edit.activate_tab(index),
            None => false,
        })
    }

    /// Route a committed navigation of `tab_id` to the right update
    pub fn update_url(
        &self,
        tab_id: TabId,
        is_active: bool,
        url: &str,
        back_forward: bool,
        initial_load: bool,
    ) {
        self.shared
            .edit(|edit| edit.update_url(tab_id, is_active, url, back_forward, initial_load));
    }

    /// Title reported by storage for a specific link of a tab
    pub fn update_link_title(&self, tab_id: TabId, link_id: LinkId, url: &str, title: &str) {
        self.shared
            .edit(|edit| edit.update_link_title(tab_id, link_id, url, title));
    }

    /// Title reported by the page; persisted to storage
    pub fn update_title(&self, tab_id: TabId, is_active: bool, title: &str) {
        self.shared
            .edit(|edit| edit.update_title(tab_id, is_active, title));
    }

    pub fn update_thumbnail_path(&self, tab_id: TabId, path: &str) {
        self.shared
            .edit(|edit| edit.update_thumbnail_path(tab_id, path));
    }

    pub fn add_favorite_icon(&self, tab_id: TabId, icon: &str) {
        self.shared.edit(|edit| edit.add_favorite_icon(tab_id, icon));
    }

    // === New tab requests ===

    /// Ask the UI to start opening a new tab
    pub fn new_tab(&self, url: &str, title: &str) {
        self.shared.observers.notify(&TabEvent::NewTabRequested {
            url: url.to_string(),
            title: title.to_string(),
        });
    }

    pub fn set_new_tab_data(
        &self,
        url: &str,
        title: &str,
        previous_page: Option<ContentHandle>,
        parent_id: TabId,
    ) {
        let data = NewTabData::new(url, title, previous_page, parent_id);
        self.shared.edit(|edit| edit.set_new_tab_data(Some(data)));
    }

    pub fn reset_new_tab_data(&self) {
        self.shared.edit(|edit| edit.set_new_tab_data(None));
    }

    pub fn has_new_tab_data(&self) -> bool {
        self.shared.list.read().pending_new_tab().is_some()
    }

    pub fn new_tab_url(&self) -> String {
        self.shared
            .list
            .read()
            .pending_new_tab()
            .map(|data| data.url.clone())
            .unwrap_or_default()
    }

    pub fn new_tab_title(&self) -> String {
        self.shared
            .list
            .read()
            .pending_new_tab()
            .map(|data| data.title.clone())
            .unwrap_or_default()
    }

    pub fn new_tab_parent_id(&self) -> TabId {
        self.shared
            .list
            .read()
            .pending_new_tab()
            .map(|data| data.parent_id)
            .unwrap_or(INVALID_TAB_ID)
    }

    pub fn new_tab_previous_page(&self) -> Option<ContentHandle> {
        self.shared
            .list
            .read()
            .pending_new_tab()
            .and_then(|data| data.previous_page)
    }

    // === Bookmark binding ===

    /// Follow `store` for the bookmarked flag, dropping any previous store
    pub fn set_bookmark_store(&self, store: &BookmarkStore) {
        {
            let mut binding = self.shared.bookmarks.lock();
            if let Some(current) = binding.as_ref().and_then(|b| b.store.upgrade()) {
                if current.same_store(store) {
                    return;
                }
            }

            if let Some(old) = binding.take() {
                if let Some(old_store) = old.store.upgrade() {
                    old_store.unsubscribe(old.subscription);
                }
            }

            let weak: Weak<Shared> = Arc::downgrade(&self.shared);
            let subscription = store.subscribe(move |event| {
                let (url, bookmarked) = match event {
                    BookmarkEvent::Added(url) => (url, true),
                    BookmarkEvent::Removed(url) => (url, false),
                    BookmarkEvent::List(_) => return,
                };
                if let Some(shared) = weak.upgrade() {
                    shared.edit(|edit| edit.update_bookmarked_status(url, bookmarked));
                }
            });

            *binding = Some(BookmarkBinding {
                store: store.downgrade(),
                subscription,
            });
        }

        self.shared.edit(|edit| {
            edit.refresh_bookmarked();
            edit.emit(TabEvent::BookmarkStoreChanged);
        });
    }

    pub fn bookmark_store(&self) -> Option<BookmarkStore> {
        self.shared.bookmark_store()
    }

    // === State ===

    pub fn set_browsing(&self, browsing: bool) {
        self.shared.edit(|edit| {
            if edit.list.browsing == browsing {
                return;
            }
            edit.list.browsing = browsing;
            if browsing {
                edit.emit(TabEvent::UpdateActiveThumbnail);
            }
            edit.emit(TabEvent::BrowsingChanged);
        });
    }

    pub fn browsing(&self) -> bool {
        self.shared.list.read().browsing
    }

    pub fn loaded(&self) -> bool {
        self.shared.list.read().loaded
    }

    pub fn next_tab_id(&self) -> TabId {
        self.shared.list.read().next_tab_id
    }

    pub fn count(&self) -> usize {
        self.shared.list.read().tabs.len()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.shared.list.read().tabs.clone()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.shared.list.read().tabs.first().cloned()
    }

    /// Order list read at the last load or written by the last save
    pub fn tab_order(&self) -> TabOrder {
        self.shared.list.read().order.clone()
    }

    pub fn dump_tabs(&self) {
        for (index, tab) in self.shared.list.read().tabs.iter().enumerate() {
            tracing::debug!(
                index,
                tab_id = tab.tab_id,
                url = %tab.url,
                title = %tab.title,
                "tab"
            );
        }
    }
}

impl ListModel for TabStore {
    type Role = TabRole;

    fn row_count(&self) -> usize {
        self.count()
    }

    fn data(&self, row: usize, role: TabRole) -> Option<RoleValue> {
        let list = self.shared.list.read();
        let tab = list.tabs.get(row)?;
        let value = match role {
            TabRole::ThumbnailPath => RoleValue::from(tab.thumbnail_path.as_str()),
            TabRole::Title => RoleValue::from(tab.title.as_str()),
            TabRole::Url => RoleValue::from(tab.url.as_str()),
            TabRole::TabId => RoleValue::from(tab.tab_id),
            TabRole::Favicon => RoleValue::from(tab.favorite_icon.as_str()),
            TabRole::Bookmarked => RoleValue::from(tab.bookmarked),
        };
        Some(value)
    }

    fn role_names(&self) -> Vec<(TabRole, &'static str)> {
        TabRole::ALL.iter().map(|role| (*role, role.name())).collect()
    }
}

/// One locked mutation of the tab list, collecting the events it causes
struct TabEdit<'a> {
    list: &'a mut TabList,
    storage: &'a dyn TabStorage,
    navigable: fn(&str) -> bool,
    bookmarks: Option<BookmarkStore>,
    events: Vec<TabEvent>,
}

impl TabEdit<'_> {
    fn emit(&mut self, event: TabEvent) {
        self.events.push(event);
    }

    fn changed(&mut self, change: ListChange<TabRole>) {
        self.events.push(TabEvent::List(change));
    }

    fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks
            .as_ref()
            .is_some_and(|store| store.contains(url))
    }

    fn add_tab(&mut self, url: &str, title: &str) -> bool {
        if !(self.navigable)(url) {
            tracing::debug!(url = %url, "Ignoring non-navigable url");
            return false;
        }

        let tab_id = match self.storage.create_tab() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Unable to create tab");
                return false;
            }
        };
        let link_id = match self.storage.create_link(tab_id, url, title) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(tab_id, error = %e, "Unable to create link");
                // A tab without a link would come back empty on the next load
                if let Err(e) = self.storage.remove_tab(tab_id) {
                    tracing::warn!(tab_id, error = %e, "Unable to discard tab record");
                }
                return false;
            }
        };

        let mut tab = Tab::new(tab_id, link_id, url, title);
        tab.bookmarked = self.is_bookmarked(url);

        let old_active = self
            .list
            .tabs
            .first()
            .map(|tab| tab.tab_id)
            .unwrap_or(INVALID_TAB_ID);
        self.list.tabs.insert(0, tab);
        self.changed(ListChange::inserted(0));
        self.update_active_tab(old_active, tab_id);

        self.changed(ListChange::CountChanged);
        self.emit(TabEvent::TabAdded(tab_id));

        self.list.next_tab_id = tab_id + 1;
        self.emit(TabEvent::NextTabIdChanged(self.list.next_tab_id));

        tracing::info!(tab_id, url = %url, "Created new tab");

        true
    }

    fn remove(&mut self, index: usize) {
        if index == 0 {
            self.close_active_tab();
        } else if let Some(tab) = self.list.tabs.get(index) {
            let (tab_id, thumbnail) = (tab.tab_id, tab.thumbnail_path.clone());
            self.remove_tab(tab_id, &thumbnail, index);
            self.save_tab_order();
        }
    }

    fn close_active_tab(&mut self) {
        let Some(active) = self.list.tabs.first_mut() else {
            return;
        };

        // Invalidate first so late storage callbacks can't match this tab
        let old_active = active.tab_id;
        active.tab_id = INVALID_TAB_ID;
        let thumbnail = active.thumbnail_path.clone();

        self.remove_tab(old_active, &thumbnail, 0);

        match self.list.tabs.first().map(|tab| tab.tab_id) {
            Some(new_active) => self.update_active_tab(old_active, new_active),
            None => self.emit(TabEvent::ActiveTabChanged {
                old: old_active,
                new: INVALID_TAB_ID,
            }),
        }
    }

    fn remove_tab(&mut self, tab_id: TabId, thumbnail: &str, index: usize) {
        if let Err(e) = self.storage.remove_tab(tab_id) {
            tracing::warn!(tab_id, error = %e, "Unable to remove tab from storage");
        }
        remove_thumbnail(thumbnail);

        self.list.tabs.remove(index);
        self.changed(ListChange::removed(index));
        self.changed(ListChange::CountChanged);
        self.emit(TabEvent::TabClosed(tab_id));

        tracing::info!(tab_id, "Closed tab");
    }

    fn clear(&mut self) {
        if self.list.tabs.is_empty() {
            return;
        }

        // Back to front so every index stays valid
        for index in (0..self.list.tabs.len()).rev() {
            let tab = &self.list.tabs[index];
            let (tab_id, thumbnail) = (tab.tab_id, tab.thumbnail_path.clone());
            self.remove_tab(tab_id, &thumbnail, index);
        }
        self.set_new_tab_data(None);
        self.emit(TabEvent::TabsCleared);
    }

    fn activate_tab(&mut self, index: usize) -> bool {
        if index == 0 {
            return !self.list.tabs.is_empty();
        }
        if index >= self.list.tabs.len() {
            return false;
        }

        let old_active = self.list.tabs[0].tab_id;
        let tab = self.list.tabs.remove(index);
        let new_active = tab.tab_id;
        self.changed(ListChange::removed(index));

        self.list.tabs.insert(0, tab);
        self.changed(ListChange::inserted(0));

        self.update_active_tab(old_active, new_active);
        true
    }

    fn update_active_tab(&mut self, old_active: TabId, new_active: TabId) {
        if self.list.tabs.is_empty() {
            return;
        }

        if old_active != new_active {
            self.emit(TabEvent::ActiveTabChanged {
                old: old_active,
                new: new_active,
            });
            self.save_tab_order();
        }
    }

    fn update_url(
        &mut self,
        tab_id: TabId,
        is_active: bool,
        url: &str,
        back_forward: bool,
        initial_load: bool,
    ) {
        if back_forward {
            self.update_tab_url(tab_id, is_active, url, false);
        } else if let Some(pending) = self.list.pending_new_tab() {
            let title = pending.title.clone();
            self.add_tab(url, &title);
        } else {
            self.update_tab_url(tab_id, is_active, url, !initial_load);
        }
        self.set_new_tab_data(None);

        if self.bookmarks.is_some() {
            let bookmarked = self.is_bookmarked(url);
            self.update_bookmarked_status(url, bookmarked);
            self.add_favorite_icon(tab_id, "");
        }
    }

    fn update_tab_url(&mut self, tab_id: TabId, is_active: bool, url: &str, navigate: bool) {
        if !(self.navigable)(url) {
            tracing::debug!(url = %url, "Ignoring non-navigable url");
            return;
        }

        let Some(index) = self.list.index_of(tab_id) else {
            return;
        };
        if self.list.tabs[index].url == url && !is_active {
            return;
        }

        let next_link = if navigate {
            match self.storage.next_link_id() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(tab_id, error = %e, "Unable to allocate link");
                    return;
                }
            }
        } else {
            None
        };

        let tab = &mut self.list.tabs[index];
        tab.url = url.to_string();
        if let Some(next_link) = next_link {
            tab.next_link = 0;
            tab.previous_link = tab.current_link;
            tab.current_link = next_link;
        }
        tab.title.clear();
        tab.thumbnail_path.clear();
        self.changed(ListChange::data_changed(
            index,
            vec![TabRole::Url, TabRole::Title, TabRole::ThumbnailPath],
        ));

        let stored = if navigate {
            self.storage.navigate_to(tab_id, url, "", "")
        } else {
            self.storage.update_tab(tab_id, url, "", "")
        };
        if let Err(e) = stored {
            tracing::warn!(tab_id, error = %e, "Unable to store tab url");
        }
    }

    fn update_link_title(&mut self, tab_id: TabId, link_id: LinkId, url: &str, title: &str) {
        let found = self.list.tabs.iter().position(|tab| {
            tab.tab_id == tab_id && tab.current_link == link_id && tab.url == url
        });
        let Some(index) = found else {
            return;
        };

        if self.list.tabs[index].title != title {
            self.list.tabs[index].title = title.to_string();
            self.changed(ListChange::data_changed(index, vec![TabRole::Title]));
        }
    }

    fn update_title(&mut self, tab_id: TabId, is_active: bool, title: &str) {
        let Some(index) = self.list.index_of(tab_id) else {
            return;
        };

        let changed = self.list.tabs[index].title != title;
        if changed {
            self.list.tabs[index].title = title.to_string();
            self.changed(ListChange::data_changed(index, vec![TabRole::Title]));
        }

        // The active tab's link may be new in storage, so it is always written
        if changed || is_active {
            let link_id = self.list.tabs[index].current_link;
            if let Err(e) = self.storage.update_title(tab_id, link_id, title) {
                tracing::warn!(tab_id, error = %e, "Unable to store tab title");
            }
        }
    }

    fn update_thumbnail_path(&mut self, tab_id: TabId, path: &str) {
        for index in 0..self.list.tabs.len() {
            let tab = &mut self.list.tabs[index];
            if tab.tab_id == tab_id && tab.thumbnail_path != path {
                tab.thumbnail_path = path.to_string();
                self.changed(ListChange::data_changed(index, vec![TabRole::ThumbnailPath]));
            }
        }
    }

    fn add_favorite_icon(&mut self, tab_id: TabId, icon: &str) {
        for index in 0..self.list.tabs.len() {
            let tab = &mut self.list.tabs[index];
            if tab.tab_id == tab_id && tab.favorite_icon != icon {
                tab.favorite_icon = icon.to_string();
                self.changed(ListChange::data_changed(index, vec![TabRole::Favicon]));
            }
        }
    }

    fn update_bookmarked_status(&mut self, url: &str, bookmarked: bool) {
        for index in 0..self.list.tabs.len() {
            if self.list.tabs[index].url == url {
                self.set_bookmarked(index, bookmarked);
            }
        }
    }

    fn refresh_bookmarked(&mut self) {
        for index in 0..self.list.tabs.len() {
            let bookmarked = self.is_bookmarked(&self.list.tabs[index].url);
            self.set_bookmarked(index, bookmarked);
        }
    }

    fn set_bookmarked(&mut self, index: usize, bookmarked: bool) {
        let tab = &mut self.list.tabs[index];
        if tab.bookmarked == bookmarked {
            return;
        }

        tab.bookmarked = bookmarked;
        let mut roles = vec![TabRole::Bookmarked];
        if !bookmarked && !tab.favorite_icon.is_empty() {
            tab.favorite_icon.clear();
            roles.push(TabRole::Favicon);
        }
        self.changed(ListChange::data_changed(index, roles));
    }

    fn set_new_tab_data(&mut self, data: Option<NewTabData>) {
        let had_data = self.list.pending_new_tab().is_some();
        let current_url = self
            .list
            .pending_new_tab()
            .map(|data| data.url.clone())
            .unwrap_or_default();
        let url_changed = match &data {
            Some(data) => current_url != data.url,
            None => !current_url.is_empty(),
        };

        self.list.new_tab_data = data;

        if url_changed {
            self.emit(TabEvent::NewTabUrlChanged);
        }
        if had_data != self.list.pending_new_tab().is_some() {
            self.emit(TabEvent::HasNewTabDataChanged);
        }
    }

    fn tabs_available(&mut self, mut tabs: Vec<Tab>) {
        let old_count = self.list.tabs.len();
        for tab in &mut tabs {
            tab.bookmarked = self.is_bookmarked(&tab.url);
        }
        self.list.tabs = tabs;

        if self.list.tabs.is_empty() {
            self.emit(TabEvent::TabsCleared);
        } else {
            self.load_tab_order();
            self.list.order.sort(&mut self.list.tabs);
        }
        self.changed(ListChange::Reset);

        if self.list.tabs.len() != old_count {
            self.changed(ListChange::CountChanged);
        }

        match self.storage.max_tab_id() {
            Ok(max) if self.list.next_tab_id != max + 1 => {
                self.list.next_tab_id = max + 1;
                self.emit(TabEvent::NextTabIdChanged(self.list.next_tab_id));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Unable to read max tab id"),
        }

        if !self.list.loaded {
            self.list.loaded = true;
            self.emit(TabEvent::LoadedChanged);
        }

        tracing::info!(count = self.list.tabs.len(), "Tabs loaded");
    }

    // Replacement only: the changed tab keeps its position and the active
    // tab is never switched from here.
    fn tab_changed(&mut self, mut tab: Tab) {
        let Some(index) = self.list.index_of(tab.tab_id) else {
            tracing::debug!(tab_id = tab.tab_id, "Changed tab not in model");
            return;
        };

        let old = &self.list.tabs[index];
        tab.bookmarked = self.is_bookmarked(&tab.url);
        if tab.favorite_icon.is_empty() && old.url == tab.url {
            tab.favorite_icon = old.favorite_icon.clone();
        }

        let mut roles = Vec::new();
        if old.url != tab.url {
            roles.push(TabRole::Url);
        }
        if old.title != tab.title {
            roles.push(TabRole::Title);
        }
        if old.thumbnail_path != tab.thumbnail_path {
            roles.push(TabRole::ThumbnailPath);
        }
        if old.favorite_icon != tab.favorite_icon {
            roles.push(TabRole::Favicon);
        }
        if old.bookmarked != tab.bookmarked {
            roles.push(TabRole::Bookmarked);
        }

        self.list.tabs[index] = tab;
        if !roles.is_empty() {
            self.changed(ListChange::data_changed(index, roles));
        }
    }

    fn load_tab_order(&mut self) {
        self.list.order = match self.storage.get_setting(TAB_ORDER_KEY) {
            Ok(value) => TabOrder::parse(value.as_deref().unwrap_or_default()),
            Err(e) => {
                tracing::warn!(error = %e, "Unable to read tab order");
                TabOrder::default()
            }
        };
    }

    fn save_tab_order(&mut self) {
        let order = TabOrder::from_tabs(&self.list.tabs);
        if let Err(e) = self.storage.save_setting(TAB_ORDER_KEY, &order.to_setting()) {
            tracing::warn!(error = %e, "Unable to save tab order");
        }
        self.list.order = order;
    }
}

fn remove_thumbnail(path: &str) {
    if path.is_empty() {
        return;
    }

    let path = Path::new(path);
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "Unable to remove thumbnail");
        }
    }
}
