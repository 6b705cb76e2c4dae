//! Query result pages.

use serde::{Deserialize, Serialize};

/// One page of query results.
///
/// `count` is the total number of records matching the query, independent
/// of `items.len()`: the last page is usually shorter, and a fetch
/// function that post-filters a server page redefines `count` as the
/// filtered total (see `caredesk-table`'s today views).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, count: u64) -> Self {
        Self { items, count }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }

    /// Total pages at the given page size, from the authoritative count.
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.count, page_size)
    }
}

/// Ceiling division of total matches by page size.
///
/// Zero matches means zero pages; a zero page size is treated the same way
/// rather than dividing by it.
#[must_use]
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(u64::from(page_size)) as u32
}
