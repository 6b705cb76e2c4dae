//! The table driver.

use crate::columns::{ColumnDescriptor, TableRow};
use caredesk_columns::{ColumnPrefs, ColumnResult, merge_visible};
use caredesk_query::{Page, QueryCache, QueryError, QueryKey, QueryResult, QueryState, total_pages};
use caredesk_types::{FilterParams, ResourceKind};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-table options supplied at mount.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Key under which this table's column preference persists. Distinct
    /// tables must use distinct keys.
    pub store_key: String,
    pub page_size: u32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            store_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// What the table currently shows.
#[derive(Debug, Clone)]
pub enum TableView<T> {
    /// Mounted, nothing requested yet.
    Idle,
    Loading,
    Loaded(Arc<Page<T>>),
    Failed(QueryError),
}

impl<T> TableView<T> {
    pub fn page(&self) -> Option<&Arc<Page<T>>> {
        match self {
            TableView::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            TableView::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TableView::Loading)
    }
}

/// Drives one paginated table.
///
/// Owns the current page/filter cursor, the merged column order, and the
/// view state. Queries go through the injected [`QueryCache`]; column
/// edits are written through the injected [`ColumnPrefs`] store
/// synchronously on every change.
pub struct TableDriver<T> {
    kind: ResourceKind,
    cache: QueryCache<T>,
    prefs: Arc<dyn ColumnPrefs>,
    store_key: String,
    columns: Vec<ColumnDescriptor<T>>,
    visible: Vec<String>,
    filters: FilterParams,
    page: u32,
    page_size: u32,
    view: TableView<T>,
}

impl<T: TableRow + Send + Sync + 'static> TableDriver<T> {
    /// Mounts a table: loads the persisted column preference under the
    /// store key and merges it against the descriptors' default order.
    ///
    /// Mounting never fails: an unreadable preference degrades to the
    /// defaults, exactly like a missing one.
    pub fn new(
        kind: ResourceKind,
        cache: QueryCache<T>,
        prefs: Arc<dyn ColumnPrefs>,
        columns: Vec<ColumnDescriptor<T>>,
        options: TableOptions,
    ) -> Self {
        let defaults: Vec<String> = columns.iter().map(|c| c.accessor.clone()).collect();
        let persisted = match prefs.load(&options.store_key) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(store_key = %options.store_key, error = %e, "failed to load column preference");
                None
            }
        };
        let visible = merge_visible(persisted.as_deref(), &defaults);

        Self {
            kind,
            cache,
            prefs,
            store_key: options.store_key,
            columns,
            visible,
            filters: FilterParams::new(),
            page: 1,
            page_size: options.page_size,
            view: TableView::Idle,
        }
    }

    // ── Cursor ───────────────────────────────────────────────────

    /// The key identifying the query this table currently wants.
    pub fn current_key(&self) -> QueryKey {
        QueryKey::new(self.kind, self.filters.clone(), self.page, self.page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Moves the page cursor. In-flight work for the old page is not
    /// cancelled; its result will fail the key comparison in
    /// [`TableDriver::apply`] and be discarded.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Changes the page size, returning the cursor to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    /// Replaces the active filters, returning the cursor to the first page.
    pub fn set_filters(&mut self, filters: FilterParams) {
        self.filters = filters;
        self.page = 1;
    }

    // ── Querying ─────────────────────────────────────────────────

    /// Resolves the current key through the cache and applies the result.
    pub async fn load_current<F, Fut>(&mut self, fetch: F) -> &TableView<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryResult<Page<T>>> + Send + 'static,
    {
        let key = self.current_key();
        self.view = TableView::Loading;
        let outcome = self.cache.resolve(key.clone(), fetch).await;
        self.apply(key, outcome);
        &self.view
    }

    /// Installs a resolved outcome into the view, but only if `key` is
    /// still the one this table wants. A result arriving for a key the
    /// user has already left is a no-op. Returns whether it was applied.
    pub fn apply(&mut self, key: QueryKey, outcome: QueryResult<Arc<Page<T>>>) -> bool {
        if key != self.current_key() {
            debug!(stale = %key, active = %self.current_key(), "discarding stale query result");
            return false;
        }
        self.view = match outcome {
            Ok(page) => TableView::Loaded(page),
            Err(err) => TableView::Failed(err),
        };
        true
    }

    pub fn view(&self) -> &TableView<T> {
        &self.view
    }

    /// Cache-side state of the current key.
    pub fn query_state(&self) -> QueryState {
        self.cache.peek(&self.current_key())
    }

    /// Total pages from the last loaded count, at the current page size.
    pub fn total_pages(&self) -> u32 {
        match &self.view {
            TableView::Loaded(page) => total_pages(page.count, self.page_size),
            _ => 0,
        }
    }

    // ── Columns ──────────────────────────────────────────────────

    /// Visible accessors in display order.
    pub fn visible_accessors(&self) -> &[String] {
        &self.visible
    }

    /// Visible descriptors in display order.
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor<T>> {
        self.visible
            .iter()
            .filter_map(|accessor| self.columns.iter().find(|c| &c.accessor == accessor))
            .collect()
    }

    /// Replaces the visible order wholesale and persists it.
    pub fn set_visible(&mut self, accessors: Vec<String>) -> ColumnResult<()> {
        self.visible = accessors;
        self.persist_visible()
    }

    /// Hides one column and persists the new order.
    pub fn hide_column(&mut self, accessor: &str) -> ColumnResult<()> {
        self.visible.retain(|a| a != accessor);
        self.persist_visible()
    }

    /// Shows a known column (appended at the end) and persists the new
    /// order. Unknown accessors are ignored.
    pub fn show_column(&mut self, accessor: &str) -> ColumnResult<()> {
        let known = self.columns.iter().any(|c| c.accessor == accessor);
        if known && !self.visible.iter().any(|a| a == accessor) {
            self.visible.push(accessor.to_string());
        }
        self.persist_visible()
    }

    fn persist_visible(&self) -> ColumnResult<()> {
        self.prefs.save(&self.store_key, &self.visible)
    }

    /// Renders one row's visible cells, in column order. Columns with a
    /// renderer use it; the rest fall back to the row's own cell lookup.
    pub fn render_row(&self, row: &T) -> Vec<String> {
        self.visible_columns()
            .into_iter()
            .map(|column| match &column.render {
                Some(render) => render(row),
                None => row.cell(&column.accessor),
            })
            .collect()
    }
}
