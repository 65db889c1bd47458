//! Paginated table widget shared by both tabs.
//! Thin TUI wrapper over [`crate::view::common::TableViewModel`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::table::Pagination;
use crate::tui::state::TabState;
use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Footer line: page label with prev/next hints, or nothing for one page.
pub fn pagination_line(pagination: &Pagination) -> Line<'static> {
    if !pagination.visible {
        return Line::default();
    }
    let hint = |enabled: bool, text: &'static str| {
        if enabled {
            Span::styled(text, Styles::help_key())
        } else {
            Span::styled(text, Styles::dim())
        }
    };
    Line::from(vec![
        hint(pagination.has_prev, "◀ prev"),
        Span::raw("  "),
        Span::styled(pagination.label(), Styles::default()),
        Span::raw("  "),
        hint(pagination.has_next, "next ▶"),
    ])
}

/// Header cells; the sorted column is underlined.
fn header_spans<Id>(vm: &TableViewModel<Id>) -> Vec<Span<'static>> {
    vm.headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let style = if vm.sort_column == Some(idx) {
                Styles::table_header_sorted()
            } else {
                Styles::table_header()
            };
            Span::styled(h.clone(), style)
        })
        .collect()
}

pub fn render_table(frame: &mut Frame, area: Rect, tab: &mut TabState, vm: TableViewModel<String>) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    tab.resolve_selection(vm.rows.iter().filter(|r| !r.is_placeholder()).count());

    let header = Row::new(header_spans(&vm)).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .enumerate()
        .map(|(idx, vr)| {
            let style = if !vr.is_placeholder() && idx == tab.selected {
                Styles::selected()
            } else {
                Styles::from_class(vr.style)
            };
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let empty = !vm.loading && vm.rows.is_empty();
    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title)
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, chunks[0]);
    frame.render_stateful_widget(table, chunks[0], &mut tab.ratatui_state);

    let footer = if empty {
        let text = if vm.search_text.is_empty() {
            "No data".to_string()
        } else {
            format!("No rows match \"{}\"", vm.search_text)
        };
        Line::from(Span::styled(text, Styles::dim()))
    } else {
        pagination_line(&vm.pagination)
    };
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Row as DataRow;
    use crate::view::tasks::{build_tasks_view, new_table};

    #[test]
    fn sorted_header_is_underlined() {
        let mut table = new_table(5);
        table.set_rows(vec![DataRow::new().with("task_id", "t1")]);
        let spans = header_spans(&build_tasks_view(&table));
        assert!(spans.iter().all(|s| s.style == Styles::table_header()));

        table.set_sort("status");
        let spans = header_spans(&build_tasks_view(&table));
        assert_eq!(spans[3].content, "Status ▲");
        assert_eq!(spans[3].style, Styles::table_header_sorted());
        assert_eq!(spans[0].style, Styles::table_header());
    }

    #[test]
    fn hidden_for_single_page() {
        let p = Pagination {
            current_page: 1,
            total_pages: 1,
            has_prev: false,
            has_next: false,
            visible: false,
        };
        assert_eq!(pagination_line(&p).to_string(), "");
    }

    #[test]
    fn shows_page_label() {
        let p = Pagination {
            current_page: 2,
            total_pages: 8,
            has_prev: true,
            has_next: true,
            visible: true,
        };
        assert_eq!(pagination_line(&p).to_string(), "◀ prev  Page 2 of 8  next ▶");
    }
}
