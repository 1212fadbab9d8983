//! Harbor list models
//!
//! Shared vocabulary for the bookmark and tab stores: the row/role accessor
//! contract a UI binding layer reads from, and the observer registry the
//! stores publish their change events through.

mod change;
mod observers;
mod role;

pub use change::ListChange;
pub use observers::{Observers, SubscriptionId};
pub use role::{ListModel, RoleValue};
