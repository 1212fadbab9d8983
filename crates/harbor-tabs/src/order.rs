//! Persisted tab order
//!
//! Display order survives restarts as a comma-separated list of tab ids in
//! the `tabOrder` setting, e.g. `"7,3,5,"`.

use crate::tab::{Tab, TabId};

pub const TAB_ORDER_KEY: &str = "tabOrder";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabOrder {
    ids: Vec<TabId>,
}

impl TabOrder {
    /// Parse a saved order, skipping entries that are not integers
    pub fn parse(value: &str) -> Self {
        Self {
            ids: value
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
        }
    }

    pub fn from_tabs(tabs: &[Tab]) -> Self {
        Self {
            ids: tabs.iter().map(|tab| tab.tab_id).collect(),
        }
    }

    pub fn ids(&self) -> &[TabId] {
        &self.ids
    }

    pub fn position(&self, tab_id: TabId) -> Option<usize> {
        self.ids.iter().position(|id| *id == tab_id)
    }

    /// Stable sort by position in the saved order.
    ///
    /// Tabs missing from the order come first, keeping their load order.
    pub fn sort(&self, tabs: &mut [Tab]) {
        tabs.sort_by_key(|tab| self.position(tab.tab_id));
    }

    pub fn to_setting(&self) -> String {
        self.ids.iter().map(|id| format!("{id},")).collect()
    }
}
