//! # ioc-core
//!
//! Core types and logic for inspecting an IOC (Input/Output Controller)
//! deployment inventory.
//!
//! - [`record`]: a single IOC record, strict equality and the three-phase diff
//! - [`inventory`]: parsing/loading an inventory snapshot and listing hosts
//! - [`history`]: the history-provider seam that yields historical snapshots
//! - [`tracker`]: the forward walk that rebuilds one IOC's change timeline
//!
//! Nothing here knows about git; the git-backed provider lives in `ioc-history`.

pub mod errors;
pub mod history;
pub mod inventory;
pub mod record;
pub mod tracker;

pub use errors::{HistoryError, InventoryError, TrackError};
pub use history::{HistoricalSnapshot, HistoryProvider, InMemoryHistory, RevisionInfo};
pub use inventory::{Inventory, list_hosts};
pub use record::{
    Change, ChangeEntry, DELETED_SENTINEL, IocRecord, apply_changes, get_changes, is_same,
};
pub use tracker::{MissingIocPolicy, Timeline, TimelineEntry, track_changes};
