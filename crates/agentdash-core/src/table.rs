//! Generic table view state: search filtering, single-column sorting, paging.
//!
//! [`TableView`] owns the rows of one dataset together with its view state and
//! recomputes the filtered/sorted order eagerly after every mutation, so reads
//! ([`TableView::visible_rows`], [`TableView::render`]) are cheap and pure.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::value::{FieldValue, Row};

/// Rows per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Indicator appended to the header of the active sort column.
pub const ASCENDING_INDICATOR: &str = "▲";
pub const DESCENDING_INDICATOR: &str = "▼";

/// Custom cell renderer: `(raw value, whole row) -> display text`.
pub type CellRenderer = Arc<dyn Fn(Option<&FieldValue>, &Row) -> String + Send + Sync>;

/// Describes how one field of a row is labeled and displayed.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    render: Option<CellRenderer>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: None,
        }
    }

    /// Attaches a custom renderer. It only affects display, never filtering
    /// or sorting.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&FieldValue>, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Display text of this column for `row`.
    pub fn display(&self, row: &Row) -> String {
        let value = row.get(&self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => value.map(ToString::to_string).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => ASCENDING_INDICATOR,
            Self::Descending => DESCENDING_INDICATOR,
        }
    }
}

/// One entry of the visible slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisibleRow<'a> {
    /// Stand-in row while the dataset is still loading.
    Placeholder,
    Row(&'a Row),
}

impl<'a> VisibleRow<'a> {
    pub fn row(&self) -> Option<&'a Row> {
        match self {
            Self::Row(r) => Some(r),
            Self::Placeholder => None,
        }
    }
}

/// Column header with its sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub label: String,
    /// Set only on the active sort column.
    pub sort: Option<SortDirection>,
}

impl Header {
    /// Label with the sort indicator appended, e.g. `Status ▲`.
    pub fn title(&self) -> String {
        match self.sort {
            Some(dir) => format!("{} {}", self.label, dir.indicator()),
            None => self.label.clone(),
        }
    }
}

/// Pagination controls for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Controls are hidden when everything fits on one page.
    pub visible: bool,
}

impl Pagination {
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// A rendered row: either a placeholder or the display text of each column.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedRow<'a> {
    Placeholder,
    Cells { row: &'a Row, cells: Vec<String> },
}

/// Complete, framework-independent render of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRender<'a> {
    pub headers: Vec<Header>,
    pub rows: Vec<RenderedRow<'a>>,
    pub pagination: Pagination,
    pub search_text: String,
    pub loading: bool,
    /// Number of rows that passed the search filter.
    pub filtered: usize,
    pub total: usize,
}

/// Search/sort/paginate state over one dataset.
#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<Column>,
    page_size: usize,
    rows: Vec<Row>,
    loading: bool,
    search_text: String,
    /// Lowercased `search_text`, cached for filtering.
    search_lower: String,
    sort_key: Option<String>,
    sort_direction: SortDirection,
    current_page: usize,
    /// Indices into `rows` after filtering and sorting.
    order: Vec<usize>,
}

impl TableView {
    /// Creates an empty view. `page_size` of zero is treated as one; columns
    /// with a key that already appeared are dropped.
    pub fn new(columns: Vec<Column>, page_size: usize) -> Self {
        let mut seen = HashSet::new();
        let columns: Vec<Column> = columns
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.key.clone());
                if !fresh {
                    warn!(key = %c.key, "duplicate column key ignored");
                }
                fresh
            })
            .collect();

        Self {
            columns,
            page_size: page_size.max(1),
            rows: Vec::new(),
            loading: false,
            search_text: String::new(),
            search_lower: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            order: Vec::new(),
        }
    }

    /// Replaces the dataset. View state goes back to defaults and the loading
    /// flag is cleared.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.loading = false;
        self.search_text.clear();
        self.search_lower.clear();
        self.sort_key = None;
        self.sort_direction = SortDirection::Ascending;
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.search_lower = self.search_text.to_lowercase();
        self.current_page = 1;
        self.recompute();
    }

    /// Sorts by `key`, or flips the direction when `key` is already the sort
    /// key. Keys that name no column are ignored.
    pub fn set_sort(&mut self, key: &str) {
        if !self.columns.iter().any(|c| c.key == key) {
            debug!(key, "sort on unknown column ignored");
            return;
        }
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
        self.recompute();
    }

    /// Moves to page `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages());
    }

    /// `ceil(filtered / page_size)`, never below 1.
    pub fn total_pages(&self) -> usize {
        self.order.len().div_ceil(self.page_size).max(1)
    }

    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Filtered rows in display order (all pages).
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> {
        self.order.iter().map(|&i| &self.rows[i])
    }

    /// The current page. While loading, exactly `page_size` placeholders.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        if self.loading {
            return vec![VisibleRow::Placeholder; self.page_size];
        }
        let start = (self.current_page - 1) * self.page_size;
        self.order
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| VisibleRow::Row(&self.rows[i]))
            .collect()
    }

    pub fn headers(&self) -> Vec<Header> {
        self.columns
            .iter()
            .map(|c| Header {
                key: c.key.clone(),
                label: c.label.clone(),
                sort: (self.sort_key.as_deref() == Some(c.key.as_str()))
                    .then_some(self.sort_direction),
            })
            .collect()
    }

    pub fn pagination(&self) -> Pagination {
        let total_pages = self.total_pages();
        Pagination {
            current_page: self.current_page,
            total_pages,
            has_prev: self.current_page > 1,
            has_next: self.current_page < total_pages,
            visible: !self.loading && total_pages > 1,
        }
    }

    /// Renders headers, the visible slice and pagination controls.
    pub fn render(&self) -> TableRender<'_> {
        let rows = self
            .visible_rows()
            .into_iter()
            .map(|v| match v {
                VisibleRow::Placeholder => RenderedRow::Placeholder,
                VisibleRow::Row(row) => RenderedRow::Cells {
                    row,
                    cells: self.columns.iter().map(|c| c.display(row)).collect(),
                },
            })
            .collect();

        TableRender {
            headers: self.headers(),
            rows,
            pagination: self.pagination(),
            search_text: self.search_text.clone(),
            loading: self.loading,
            filtered: self.order.len(),
            total: self.rows.len(),
        }
    }

    fn matches_search(&self, row: &Row) -> bool {
        if self.search_lower.is_empty() {
            return true;
        }
        self.columns.iter().any(|c| {
            row.get(&c.key)
                .map(|v| v.to_string().to_lowercase().contains(&self.search_lower))
                .unwrap_or(false)
        })
    }

    /// Rebuilds `order` and clamps `current_page` into range.
    fn recompute(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.matches_search(&self.rows[i]))
            .collect();

        if let Some(key) = self.sort_key.as_deref() {
            let desc = self.sort_direction == SortDirection::Descending;
            let null = FieldValue::Null;
            // `sort_by` is stable; descending reverses the comparison so that
            // equal keys keep their input order.
            order.sort_by(|&a, &b| {
                let va = self.rows[a].get(key).unwrap_or(&null);
                let vb = self.rows[b].get(key).unwrap_or(&null);
                let cmp: Ordering = va.natural_cmp(vb);
                if desc { cmp.reverse() } else { cmp }
            });
        }

        self.order = order;
        self.current_page = self.current_page.clamp(1, self.total_pages());
        debug!(
            total = self.rows.len(),
            filtered = self.order.len(),
            page = self.current_page,
            "table recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: i64) -> Row {
        Row::new().with("id", id).with("score", score)
    }

    fn ids(view: &TableView) -> Vec<String> {
        view.visible_rows()
            .iter()
            .filter_map(|v| v.row())
            .map(|r| r.display("id"))
            .collect()
    }

    fn score_view(page_size: usize) -> TableView {
        TableView::new(
            vec![Column::new("id", "ID"), Column::new("score", "Score")],
            page_size,
        )
    }

    #[test]
    fn sort_is_stable_and_pages() {
        let mut view = score_view(2);
        view.set_rows(vec![scored("a", 3), scored("b", 1), scored("c", 1)]);

        view.set_sort("score");
        assert_eq!(view.sort_direction(), SortDirection::Ascending);
        assert_eq!(ids(&view), vec!["b", "c"]);

        view.go_to_page(2);
        assert_eq!(ids(&view), vec!["a"]);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let mut view = score_view(10);
        view.set_rows(vec![scored("a", 1), scored("b", 3), scored("c", 1)]);
        view.set_sort("score");
        view.set_sort("score");
        assert_eq!(view.sort_direction(), SortDirection::Descending);
        assert_eq!(ids(&view), vec!["b", "a", "c"]);
    }

    #[test]
    fn set_sort_toggles_once_per_call() {
        let mut view = score_view(5);
        view.set_rows(vec![scored("a", 1)]);
        view.set_sort("score");
        let start = view.sort_direction();
        for _ in 0..4 {
            view.set_sort("score");
        }
        assert_eq!(view.sort_direction(), start);

        view.set_sort("id");
        assert_eq!(view.sort_key(), Some("id"));
        assert_eq!(view.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn unknown_sort_key_is_ignored() {
        let mut view = score_view(5);
        view.set_rows(vec![scored("b", 2), scored("a", 1)]);
        view.set_sort("nope");
        assert_eq!(view.sort_key(), None);
        assert_eq!(ids(&view), vec!["b", "a"]);
    }

    #[test]
    fn sort_does_not_reset_page() {
        let mut view = score_view(1);
        view.set_rows(vec![scored("a", 3), scored("b", 1), scored("c", 2)]);
        view.go_to_page(3);
        view.set_sort("score");
        assert_eq!(view.current_page(), 3);
        assert_eq!(ids(&view), vec!["a"]);
    }

    #[test]
    fn search_is_case_insensitive_and_uses_raw_values() {
        let columns = vec![
            Column::new("id", "ID"),
            Column::new("cmd", "Command").with_render(|_, _| "hidden".to_string()),
        ];
        let mut view = TableView::new(columns, 5);
        view.set_rows(vec![
            Row::new().with("id", "Alpha").with("cmd", "ls -la"),
            Row::new().with("id", "beta").with("cmd", "DF -H"),
            Row::new().with("id", "gamma").with("other", "alpha"),
        ]);

        view.set_search_text("ALP");
        assert_eq!(ids(&view), vec!["Alpha"]);

        view.set_search_text("df -h");
        assert_eq!(ids(&view), vec!["beta"]);

        // Render output is not searched.
        view.set_search_text("hidden");
        assert_eq!(view.filtered_len(), 0);

        view.set_search_text("");
        assert_eq!(view.filtered_len(), 3);
    }

    #[test]
    fn numbers_are_searched_by_their_text() {
        let mut view = score_view(5);
        view.set_rows(vec![scored("a", 120), scored("b", 7)]);
        view.set_search_text("12");
        assert_eq!(ids(&view), vec!["a"]);
    }

    #[test]
    fn go_to_page_clamps() {
        let mut view = score_view(2);
        view.set_rows((0..5).map(|i| scored(&format!("r{i}"), i)).collect());
        assert_eq!(view.total_pages(), 3);

        view.go_to_page(0);
        assert_eq!(view.current_page(), 1);
        view.go_to_page(99);
        assert_eq!(view.current_page(), 3);
        assert_eq!(ids(&view), vec!["r4"]);

        view.prev_page();
        assert_eq!(view.current_page(), 2);
        view.first_page();
        view.prev_page();
        assert_eq!(view.current_page(), 1);
        view.last_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn narrowing_search_reclamps_page() {
        let mut view = score_view(2);
        let mut rows: Vec<Row> = (0..9).map(|i| scored(&format!("row{i}"), i)).collect();
        rows.push(scored("needle", 42));
        view.set_rows(rows);
        assert_eq!(view.total_pages(), 5);

        view.go_to_page(3);
        assert_eq!(view.current_page(), 3);

        view.set_search_text("needle");
        assert_eq!(view.current_page(), 1);
        assert_eq!(ids(&view), vec!["needle"]);
    }

    #[test]
    fn loading_renders_placeholders() {
        let mut view = score_view(4);
        view.set_rows(vec![scored("a", 1)]);
        view.set_loading(true);

        let visible = view.visible_rows();
        assert_eq!(visible.len(), 4);
        assert!(visible.iter().all(|v| *v == VisibleRow::Placeholder));
        assert!(!view.pagination().visible);

        view.set_rows(vec![scored("b", 2)]);
        assert!(!view.is_loading());
        assert_eq!(ids(&view), vec!["b"]);
    }

    #[test]
    fn new_rows_reset_view_state() {
        let mut view = score_view(1);
        view.set_rows(vec![scored("a", 1), scored("b", 2)]);
        view.set_search_text("a");
        view.set_sort("score");
        view.set_rows(vec![scored("c", 1), scored("d", 2)]);

        assert_eq!(view.search_text(), "");
        assert_eq!(view.sort_key(), None);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn empty_inputs_are_harmless() {
        let mut view = TableView::new(Vec::new(), 0);
        assert_eq!(view.page_size(), 1);
        view.set_rows(vec![scored("a", 1)]);
        // No columns: nothing can match a non-empty search.
        view.set_search_text("a");
        assert!(view.visible_rows().is_empty());
        assert_eq!(view.total_pages(), 1);
    }

    #[test]
    fn headers_carry_sort_indicator() {
        let mut view = score_view(5);
        view.set_rows(vec![scored("a", 1)]);
        view.set_sort("score");
        let titles: Vec<String> = view.headers().iter().map(Header::title).collect();
        assert_eq!(titles, vec!["ID".to_string(), "Score ▲".to_string()]);
        view.set_sort("score");
        assert_eq!(view.headers()[1].title(), "Score ▼");
    }

    #[test]
    fn pagination_controls() {
        let mut view = score_view(2);
        view.set_rows((0..3).map(|i| scored(&format!("r{i}"), i)).collect());
        let p = view.pagination();
        assert!(p.visible);
        assert!(!p.has_prev);
        assert!(p.has_next);
        assert_eq!(p.label(), "Page 1 of 2");

        view.next_page();
        let p = view.pagination();
        assert!(p.has_prev);
        assert!(!p.has_next);

        view.set_search_text("r1");
        assert!(!view.pagination().visible);
    }

    #[test]
    fn duplicate_column_keys_keep_first() {
        let view = TableView::new(
            vec![Column::new("id", "First"), Column::new("id", "Second")],
            5,
        );
        assert_eq!(view.columns().len(), 1);
        assert_eq!(view.columns()[0].label, "First");
    }

    #[test]
    fn render_uses_custom_renderers() {
        let columns = vec![
            Column::new("id", "ID"),
            Column::new("score", "Score").with_render(|v, row| {
                format!("{}:{}", row.display("id"), v.map(|v| v.to_string()).unwrap_or_default())
            }),
        ];
        let mut view = TableView::new(columns, 5);
        view.set_rows(vec![scored("a", 3)]);
        let render = view.render();
        match &render.rows[0] {
            RenderedRow::Cells { cells, .. } => assert_eq!(cells, &vec!["a", "a:3"]),
            RenderedRow::Placeholder => panic!("expected data row"),
        }
        assert_eq!(render.filtered, 1);
        assert_eq!(render.total, 1);
    }
}
