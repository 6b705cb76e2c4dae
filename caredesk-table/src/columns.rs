//! Column descriptors.

use std::fmt;

/// A custom cell renderer for one column.
pub type RenderFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// Caller-supplied definition of one table column.
///
/// Descriptors are never persisted; only the user's visibility and order
/// preference over their accessors is (see `caredesk-columns`).
pub struct ColumnDescriptor<T> {
    /// Unique within one table; the unit the preference store works in.
    pub accessor: String,
    pub title: String,
    /// Custom renderer; columns without one fall back to
    /// [`TableRow::cell`].
    pub render: Option<RenderFn<T>>,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(accessor: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
            title: title.into(),
            render: None,
        }
    }

    #[must_use]
    pub fn with_render(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("accessor", &self.accessor)
            .field("title", &self.title)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Row-side cell lookup for columns without a custom renderer.
pub trait TableRow {
    /// The display value for `accessor`. Unknown accessors render as an
    /// empty cell rather than panicking mid-table.
    fn cell(&self, accessor: &str) -> String;
}
