//! Agents view model: column set, row styling and the detail card.

use chrono::Utc;

use crate::fmt::{format_age, format_timestamp, or_fallback, parse_timestamp};
use crate::table::{Column, TableView};
use crate::value::Row;
use crate::view::common::{DetailField, RowStyleClass, TableViewModel, build_table_view};

/// Field identifying an agent.
pub const ID_KEY: &str = "agent_id";

const WIDTHS: &[u16] = &[14, 16, 16, 10, 20];

pub fn columns() -> Vec<Column> {
    vec![
        Column::new(ID_KEY, "Agent ID"),
        Column::new("ip", "IP Address"),
        Column::new("os", "OS"),
        Column::new("status", "Status"),
        Column::new("last_seen", "Last Seen").with_render(|value, _| {
            value
                .map(|v| format_timestamp(&v.to_string()))
                .unwrap_or_default()
        }),
    ]
}

pub fn new_table(page_size: usize) -> TableView {
    TableView::new(columns(), page_size)
}

fn row_style(row: &Row) -> RowStyleClass {
    match row.display("status").trim().to_lowercase().as_str() {
        "online" => RowStyleClass::Active,
        "offline" => RowStyleClass::Dimmed,
        "" => RowStyleClass::Normal,
        _ => RowStyleClass::Warning,
    }
}

pub fn build_agents_view(table: &TableView) -> TableViewModel<String> {
    build_table_view("Agents", table, ID_KEY, WIDTHS, row_style)
}

/// Finds the agent with the given ID.
pub fn find<'a>(table: &'a TableView, agent_id: &str) -> Option<&'a Row> {
    table.rows().iter().find(|r| r.display(ID_KEY) == agent_id)
}

/// Fields of the agent detail card.
pub fn detail(row: &Row) -> Vec<DetailField> {
    let raw = row.display("last_seen");
    let last_seen = match parse_timestamp(&raw) {
        Some(_) => format!(
            "{} ({} ago)",
            format_timestamp(&raw),
            format_age(&raw, Utc::now())
        ),
        None => or_fallback(&raw, "N/A"),
    };
    vec![
        DetailField::line("ID", row.display(ID_KEY)),
        DetailField::line("Status", row.display("status")),
        DetailField::line("IP", row.display("ip")),
        DetailField::line("MAC", row.display("mac")),
        DetailField::line("Hostname", row.display("hostname")),
        DetailField::line("Vendor", row.display("vendor")),
        DetailField::line("OS", row.display("os")),
        DetailField::line("Username", row.display("username")),
        DetailField::line("Last Seen", last_seen),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str, status: &str) -> Row {
        Row::new()
            .with(ID_KEY, id)
            .with("ip", "10.0.0.1")
            .with("os", "linux")
            .with("status", status)
            .with("last_seen", "not-a-date")
    }

    #[test]
    fn status_drives_row_style() {
        assert_eq!(row_style(&agent("a", "Online")), RowStyleClass::Active);
        assert_eq!(row_style(&agent("a", "offline")), RowStyleClass::Dimmed);
        assert_eq!(row_style(&agent("a", "quarantined")), RowStyleClass::Warning);
        assert_eq!(row_style(&Row::new()), RowStyleClass::Normal);
    }

    #[test]
    fn view_uses_agent_ids() {
        let mut table = new_table(5);
        table.set_rows(vec![agent("agent-2", "online"), agent("agent-1", "offline")]);
        table.set_sort(ID_KEY);
        let vm = build_agents_view(&table);
        let ids: Vec<_> = vm.rows.iter().filter_map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["agent-1", "agent-2"]);
        assert_eq!(vm.headers[0], "Agent ID ▲");
        assert_eq!(vm.rows[0].cells[4].text, "not-a-date");
    }

    #[test]
    fn detail_lists_every_field() {
        let row = agent("agent-7", "online").with("mac", "aa:bb");
        let fields = detail(&row);
        let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec!["ID", "Status", "IP", "MAC", "Hostname", "Vendor", "OS", "Username", "Last Seen"]
        );
        assert_eq!(fields[3].value, "aa:bb");
        assert_eq!(fields[4].value, "");

        let table = {
            let mut t = new_table(5);
            t.set_rows(vec![row.clone()]);
            t
        };
        assert_eq!(find(&table, "agent-7"), Some(&row));
        assert_eq!(find(&table, "agent-8"), None);
    }

    #[test]
    fn last_seen_shows_age() {
        let fields = detail(&Row::new().with("last_seen", "2000-01-01T00:00:00Z"));
        let value = &fields.last().unwrap().value;
        assert!(value.ends_with("d ago)"), "{value}");

        let fields = detail(&agent("a", "online"));
        assert_eq!(fields.last().unwrap().value, "not-a-date");
    }

    #[test]
    fn missing_last_seen_is_na() {
        let fields = detail(&Row::new());
        assert_eq!(fields.last().map(|f| f.value.as_str()), Some("N/A"));
    }
}
