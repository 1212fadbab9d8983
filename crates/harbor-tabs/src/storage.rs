//! Tab and link storage
//!
//! The tab store never talks to a database directly. Everything it
//! persists goes through [`TabStorage`]; [`Database`] provides the SQLite
//! implementation.

use chrono::Utc;
use rusqlite::OptionalExtension;
use tokio::sync::oneshot;

use harbor_storage::Database;

use crate::error::TabError;
use crate::tab::{LinkId, Tab, TabId};
use crate::Result;

/// One-shot delivery of the persisted tab list
pub type TabDelivery = oneshot::Receiver<Result<Vec<Tab>>>;

pub trait TabStorage: Send + Sync {
    /// Allocate a new tab id
    fn create_tab(&self) -> Result<TabId>;

    /// Create the first link of a tab and make it current
    fn create_link(&self, tab_id: TabId, url: &str, title: &str) -> Result<LinkId>;

    /// Id the next `navigate_to` call will assign
    fn next_link_id(&self) -> Result<LinkId>;

    /// Overwrite the tab's current link
    fn update_tab(&self, tab_id: TabId, url: &str, title: &str, thumbnail_path: &str) -> Result<()>;

    /// Append a link to the tab's history and make it current
    fn navigate_to(&self, tab_id: TabId, url: &str, title: &str, thumbnail_path: &str) -> Result<()>;

    fn update_title(&self, tab_id: TabId, link_id: LinkId, title: &str) -> Result<()>;

    fn remove_tab(&self, tab_id: TabId) -> Result<()>;

    /// Request every persisted tab. The result arrives through the returned
    /// receiver, resolved exactly once.
    fn all_tabs(&self) -> TabDelivery;

    /// Highest tab id handed out so far, 0 if none
    fn max_tab_id(&self) -> Result<TabId>;

    fn save_setting(&self, key: &str, value: &str) -> Result<()>;

    fn get_setting(&self, key: &str) -> Result<Option<String>>;
}

/// Tab and link ids are SQLite rowids narrowed to `i32`
fn row_id(id: i64) -> Result<i32> {
    i32::try_from(id).map_err(|_| TabError::IdOutOfRange(id))
}

impl TabStorage for Database {
    fn create_tab(&self) -> Result<TabId> {
        let now = Utc::now().to_rfc3339();
        let tab_id = self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO tabs (current_link, created_at, updated_at) VALUES (0, ?1, ?1)",
                [&now],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(tab_id, "Created tab record");

        row_id(tab_id)
    }

    fn create_link(&self, tab_id: TabId, url: &str, title: &str) -> Result<LinkId> {
        let now = Utc::now().to_rfc3339();
        let link_id = self.transaction(|conn| {
            conn.execute(
                "INSERT INTO links (tab_id, url, title, thumb_path, created_at)
                 VALUES (?1, ?2, ?3, '', ?4)",
                rusqlite::params![tab_id, url, title, now],
            )?;
            let link_id = conn.last_insert_rowid();
            conn.execute(
                "UPDATE tabs SET current_link = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![link_id, now, tab_id],
            )?;
            Ok(link_id)
        })?;

        row_id(link_id)
    }

    fn next_link_id(&self) -> Result<LinkId> {
        row_id(self.last_sequence("links")? + 1)
    }

    fn update_tab(&self, tab_id: TabId, url: &str, title: &str, thumbnail_path: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.transaction(|conn| {
            let current: Option<i64> = conn
                .query_row("SELECT current_link FROM tabs WHERE id = ?1", [tab_id], |row| {
                    row.get(0)
                })
                .optional()?;
            let Some(current) = current else {
                return Ok(false);
            };

            conn.execute(
                "UPDATE links SET url = ?1, title = ?2, thumb_path = ?3 WHERE id = ?4",
                rusqlite::params![url, title, thumbnail_path, current],
            )?;
            conn.execute(
                "UPDATE tabs SET updated_at = ?1 WHERE id = ?2",
                rusqlite::params![now, tab_id],
            )?;
            Ok(true)
        })?;

        if !updated {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        Ok(())
    }

    fn navigate_to(&self, tab_id: TabId, url: &str, title: &str, thumbnail_path: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let navigated = self.transaction(|conn| {
            let current: Option<i64> = conn
                .query_row("SELECT current_link FROM tabs WHERE id = ?1", [tab_id], |row| {
                    row.get(0)
                })
                .optional()?;
            let Some(current) = current else {
                return Ok(false);
            };

            // Forward history is dropped once the user navigates elsewhere
            conn.execute(
                "DELETE FROM links WHERE tab_id = ?1 AND id > ?2",
                rusqlite::params![tab_id, current],
            )?;
            conn.execute(
                "INSERT INTO links (tab_id, url, title, thumb_path, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![tab_id, url, title, thumbnail_path, now],
            )?;
            let link_id = conn.last_insert_rowid();
            conn.execute(
                "UPDATE tabs SET current_link = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![link_id, now, tab_id],
            )?;
            Ok(true)
        })?;

        if !navigated {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        Ok(())
    }

    fn update_title(&self, tab_id: TabId, link_id: LinkId, title: &str) -> Result<()> {
        Ok(self.with_connection(|conn| {
            conn.execute(
                "UPDATE links SET title = ?1 WHERE id = ?2 AND tab_id = ?3",
                rusqlite::params![title, link_id, tab_id],
            )?;
            Ok(())
        })?)
    }

    fn remove_tab(&self, tab_id: TabId) -> Result<()> {
        self.transaction(|conn| {
            conn.execute("DELETE FROM links WHERE tab_id = ?1", [tab_id])?;
            conn.execute("DELETE FROM tabs WHERE id = ?1", [tab_id])?;
            Ok(())
        })?;

        tracing::debug!(tab_id, "Removed tab record");

        Ok(())
    }

    fn all_tabs(&self) -> TabDelivery {
        let (tx, rx) = oneshot::channel();
        let tabs = self
            .with_connection(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT t.id, t.current_link,
                            COALESCE(l.url, ''), COALESCE(l.title, ''), COALESCE(l.thumb_path, ''),
                            (SELECT COALESCE(MAX(p.id), 0) FROM links p
                              WHERE p.tab_id = t.id AND p.id < t.current_link),
                            (SELECT COALESCE(MIN(n.id), 0) FROM links n
                              WHERE n.tab_id = t.id AND n.id > t.current_link)
                     FROM tabs t
                     LEFT JOIN links l ON l.id = t.current_link
                     ORDER BY t.id",
                )?;

                let tabs: Vec<Tab> = stmt
                    .query_map([], |row| {
                        Ok(Tab {
                            tab_id: row.get(0)?,
                            current_link: row.get(1)?,
                            url: row.get(2)?,
                            title: row.get(3)?,
                            thumbnail_path: row.get(4)?,
                            previous_link: row.get(5)?,
                            next_link: row.get(6)?,
                            ..Default::default()
                        })
                    })?
                    .filter_map(|r| match r {
                        Ok(tab) => Some(tab),
                        Err(e) => {
                            tracing::warn!(error = %e, "Skipping unreadable tab row");
                            None
                        }
                    })
                    .collect();

                Ok(tabs)
            })
            .map_err(TabError::from);

        // The receiver may already be gone; nothing left to deliver to then
        let _ = tx.send(tabs);
        rx
    }

    fn max_tab_id(&self) -> Result<TabId> {
        row_id(self.last_sequence("tabs")?)
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.set_setting(key, value)?)
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(Database::get_setting(self, key)?)
    }
}
