//! Tasks view model: column set, row styling and the task result card.

use crate::fmt::{format_timestamp, normalize_for_display, or_fallback, truncate};
use crate::table::{Column, TableView};
use crate::value::Row;
use crate::view::common::{DetailField, RowStyleClass, TableViewModel, build_table_view};

/// Field identifying a task.
pub const ID_KEY: &str = "task_id";

/// Commands longer than this are cut in the table.
pub const COMMAND_MAX_CHARS: usize = 50;

const WIDTHS: &[u16] = &[10, 14, 10, 11];

pub fn columns() -> Vec<Column> {
    vec![
        Column::new(ID_KEY, "Task ID"),
        Column::new("agent_id", "Agent ID"),
        Column::new("os_type", "OS"),
        Column::new("status", "Status"),
        Column::new("command", "Command").with_render(|value, _| {
            let cmd = value.map(ToString::to_string).unwrap_or_default();
            truncate(&normalize_for_display(&cmd), COMMAND_MAX_CHARS)
        }),
    ]
}

pub fn new_table(page_size: usize) -> TableView {
    TableView::new(columns(), page_size)
}

/// Style class of a task status, shared by the table rows and the summary.
pub fn status_class(status: &str) -> RowStyleClass {
    match status.trim().to_lowercase().as_str() {
        "completed" | "success" | "done" => RowStyleClass::Active,
        "failed" | "error" => RowStyleClass::Critical,
        "pending" | "running" | "assigned" => RowStyleClass::Warning,
        _ => RowStyleClass::Normal,
    }
}

fn row_style(row: &Row) -> RowStyleClass {
    status_class(&row.display("status"))
}

pub fn build_tasks_view(table: &TableView) -> TableViewModel<String> {
    build_table_view("Tasks", table, ID_KEY, WIDTHS, row_style)
}

/// Finds the task with the given ID.
pub fn find<'a>(table: &'a TableView, task_id: &str) -> Option<&'a Row> {
    table.rows().iter().find(|r| r.display(ID_KEY) == task_id)
}

/// Fields of the task result card.
pub fn detail(row: &Row) -> Vec<DetailField> {
    let timestamp = |key: &str| {
        let raw = row.display(key);
        or_fallback(&format_timestamp(&raw), "N/A")
    };
    vec![
        DetailField::line("Task ID", row.display(ID_KEY)),
        DetailField::line("Agent ID", row.display("agent_id")),
        DetailField::line("OS Type", row.display("os_type")),
        DetailField::line("Status", row.display("status")),
        DetailField::block("Command", row.display("command")),
        DetailField::block("Stdout", or_fallback(&row.display("stdout"), "No output")),
        DetailField::block("Stderr", or_fallback(&row.display("stderr"), "No errors")),
        DetailField::line("Return Code", or_fallback(&row.display("returncode"), "N/A")),
        DetailField::line("Created At", timestamp("created_at")),
        DetailField::line("Updated At", timestamp("updated_at")),
    ]
}
