//! Paginated resource-query engine for CareDesk.
//!
//! Every tabular view in the client is backed by the same mechanism:
//! - [`QueryKey`] — identifies one paginated, filtered request
//! - [`QueryCache`] — resolves keys to cached pages or deduplicated fetches
//! - [`RelationSlot`] — lazy, single-flight resolution of a foreign record
//!   on an individual entity instance
//!
//! # Single-flight
//!
//! Both caches follow the same discipline: the pending marker (a shared
//! future) is installed in the same critical section that decides a fetch
//! is needed, before the fetch is first polled. A concurrent caller for the
//! same key or slot therefore always finds the marker and joins the
//! in-flight work instead of issuing its own fetch. Completion order of
//! independent fetches is never assumed.
//!
//! # Staleness and cancellation
//!
//! There is no network-level cancellation. A result that arrives for a key
//! the consumer has already left is detected by key comparison at apply
//! time (see `caredesk-table`) and discarded; an entry invalidated while
//! its fetch is in flight is never resurrected by the late completion.

mod cache;
mod error;
mod key;
mod page;
mod relation;

pub use cache::{QueryCache, QueryState};
pub use error::{QueryError, QueryResult};
pub use key::QueryKey;
pub use page::{Page, total_pages};
pub use relation::{RelationSlot, SlotStatus};
