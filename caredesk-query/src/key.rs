//! Query keys.

use caredesk_types::{FilterParams, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one paginated, filtered request.
///
/// Two keys address the same cache entry iff every component matches:
/// resource kind, every filter value, page, and page size. Changing any one
/// of them is a different query with its own entry and its own fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub filters: FilterParams,
    pub page: u32,
    pub page_size: u32,
}

impl QueryKey {
    #[must_use]
    pub fn new(kind: ResourceKind, filters: FilterParams, page: u32, page_size: u32) -> Self {
        Self {
            kind,
            filters,
            page,
            page_size,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?", self.kind)?;
        for (k, v) in self.filters.iter() {
            write!(f, "{k}={v}&")?;
        }
        write!(f, "page={}&page_size={}", self.page, self.page_size)
    }
}
