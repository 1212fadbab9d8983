//! Harbor Tab Management
//!
//! Ordered tab list where the first tab is the active one. Tabs keep a
//! link history in storage and a bookmarked flag mirrored from the
//! bookmark store.

mod error;
mod event;
mod link;
mod new_tab;
mod order;
mod storage;
mod store;
mod tab;

pub use error::TabError;
pub use event::{TabEvent, TabRole};
pub use link::{is_navigable, validate};
pub use new_tab::{ContentHandle, NewTabData};
pub use order::{TabOrder, TAB_ORDER_KEY};
pub use storage::{TabDelivery, TabStorage};
pub use store::TabStore;
pub use tab::{LinkId, Tab, TabId, INVALID_TAB_ID};

pub type Result<T> = std::result::Result<T, TabError>;
