//! Column configuration for CareDesk tables.
//!
//! A table's column descriptors are supplied by its caller and never
//! persisted; only the user's preference (which accessors are visible and
//! in what order) outlives a session, keyed by a caller-supplied store
//! key so distinct tables never interfere.
//!
//! Loading merges the persisted order against the caller's current
//! defaults ([`merge_visible`]): columns removed upstream drop out
//! silently, columns introduced upstream appear at the end. The merge is
//! total: corrupt or missing persisted state degrades to the defaults,
//! never to an error.

mod error;
mod merge;
mod store;

pub use error::{ColumnError, ColumnResult};
pub use merge::merge_visible;
pub use store::{ColumnPrefs, SqliteColumnStore};
