//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles; tests inspect them
//! directly.

use crate::table::{Pagination, RenderedRow, TableView};
use crate::value::Row;

/// Text shown in every cell of a loading placeholder row.
pub const PLACEHOLDER_CELL: &str = "···";

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow).
    Warning,
    /// Critical level (TUI: red).
    Critical,
    /// Positive/active (TUI: green). E.g. "online" agents.
    Active,
    /// Dimmed (TUI: dark gray). E.g. offline agents, placeholders.
    Dimmed,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type. Placeholders have no ID.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<Id> {
    pub id: Option<Id>,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

impl<Id> ViewRow<Id> {
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel<Id> {
    pub title: String,
    /// Header titles, the sort column carrying its ▲/▼ indicator.
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    pub sort_column: Option<usize>,
    pub pagination: Pagination,
    pub search_text: String,
    pub loading: bool,
    pub filtered: usize,
    pub total: usize,
}

/// One labeled line of a detail popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
    /// Multi-line values (command output) are shown as a block.
    pub block: bool,
}

impl DetailField {
    pub fn line(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            block: false,
        }
    }

    pub fn block(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            block: true,
        }
    }
}

/// Builds a view model from the engine's current render.
///
/// `id_key` names the field used as the row's entity ID (for drill-down);
/// `classify` picks the row style from the raw row.
pub fn build_table_view(
    title: &str,
    table: &TableView,
    id_key: &str,
    widths: &[u16],
    classify: fn(&Row) -> RowStyleClass,
) -> TableViewModel<String> {
    let render = table.render();

    let sort_column = render.headers.iter().position(|h| h.sort.is_some());
    let headers = render.headers.iter().map(|h| h.title()).collect();
    let column_count = render.headers.len();

    let rows = render
        .rows
        .into_iter()
        .map(|r| match r {
            RenderedRow::Placeholder => ViewRow {
                id: None,
                cells: (0..column_count)
                    .map(|_| ViewCell::plain(PLACEHOLDER_CELL.to_string()))
                    .collect(),
                style: RowStyleClass::Dimmed,
            },
            RenderedRow::Cells { row, cells } => ViewRow {
                id: Some(row.display(id_key)),
                cells: cells.into_iter().map(ViewCell::plain).collect(),
                style: classify(row),
            },
        })
        .collect();

    let title = if render.loading {
        format!(" {} (loading…) ", title)
    } else if render.search_text.is_empty() {
        format!(" {} ({}) ", title, render.total)
    } else {
        format!(" {} ({}/{}) ", title, render.filtered, render.total)
    };

    TableViewModel {
        title,
        headers,
        widths: widths.to_vec(),
        rows,
        sort_column,
        pagination: render.pagination,
        search_text: render.search_text,
        loading: render.loading,
        filtered: render.filtered,
        total: render.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn classify(row: &Row) -> RowStyleClass {
        if row.display("flag") == "bad" {
            RowStyleClass::Critical
        } else {
            RowStyleClass::Normal
        }
    }

    fn table() -> TableView {
        let mut t = TableView::new(vec![Column::new("id", "ID"), Column::new("flag", "Flag")], 2);
        t.set_rows(vec![
            Row::new().with("id", "x").with("flag", "bad"),
            Row::new().with("id", "y").with("flag", "good"),
            Row::new().with("id", "z").with("flag", "good"),
        ]);
        t
    }

    #[test]
    fn builds_rows_with_ids_and_styles() {
        let mut t = table();
        t.set_sort("flag");
        let vm = build_table_view("Items", &t, "id", &[4, 6], classify);
        assert_eq!(vm.title, " Items (3) ");
        assert_eq!(vm.headers, vec!["ID", "Flag ▲"]);
        assert_eq!(vm.sort_column, Some(1));
        assert_eq!(vm.rows.len(), 2);
        assert_eq!(vm.rows[0].id.as_deref(), Some("x"));
        assert_eq!(vm.rows[0].style, RowStyleClass::Critical);
        assert_eq!(vm.rows[1].cells[1].text, "good");
        assert!(vm.pagination.visible);
    }

    #[test]
    fn search_shows_filtered_count() {
        let mut t = table();
        t.set_search_text("GOOD");
        let vm = build_table_view("Items", &t, "id", &[], classify);
        assert_eq!(vm.title, " Items (2/3) ");
        assert_eq!(vm.search_text, "GOOD");
    }

    #[test]
    fn loading_rows_are_placeholders() {
        let mut t = table();
        t.set_loading(true);
        let vm = build_table_view("Items", &t, "id", &[], classify);
        assert!(vm.loading);
        assert_eq!(vm.rows.len(), 2);
        assert!(vm.rows.iter().all(ViewRow::is_placeholder));
        assert_eq!(vm.rows[0].cells.len(), 2);
        assert_eq!(vm.rows[0].cells[0].text, PLACEHOLDER_CELL);
        assert_eq!(vm.rows[0].style, RowStyleClass::Dimmed);
    }
}
