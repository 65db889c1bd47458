//! Agent and task detail popups.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;
use crate::view::common::DetailField;
use crate::view::{agents, tasks};

use super::popup::{kv, render_popup_frame, section};

/// Turns detail fields into popup lines: single-line fields first, then
/// multi-line blocks each under its own section header.
pub fn build_content(fields: &[DetailField]) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = fields
        .iter()
        .filter(|f| !f.block)
        .map(|f| kv(f.label, &f.value))
        .collect();

    for field in fields.iter().filter(|f| f.block) {
        lines.push(Line::from(""));
        lines.push(section(field.label));
        lines.extend(
            field
                .value
                .lines()
                .map(|l| Line::from(Span::raw(l.to_string()))),
        );
    }
    lines
}

fn missing(what: &str, id: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        format!("{} {} is no longer in the dataset", what, id),
        Styles::dim(),
    ))]
}

/// Renders whichever detail popup is open.
pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    match &mut state.popup {
        PopupState::AgentDetail { agent_id, scroll } => {
            let content = match agents::find(&state.agents.table, agent_id) {
                Some(row) => build_content(&agents::detail(row)),
                None => missing("Agent", agent_id),
            };
            let title = format!("Agent {}", agent_id);
            render_popup_frame(frame, area, &title, content, scroll);
        }
        PopupState::TaskDetail { task_id, scroll } => {
            let content = match tasks::find(&state.tasks.table, task_id) {
                Some(row) => build_content(&tasks::detail(row)),
                None => missing("Task", task_id),
            };
            let title = format!("Task {}", task_id);
            render_popup_frame(frame, area, &title, content, scroll);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Row;

    #[test]
    fn blocks_go_last_under_sections() {
        let row = Row::new()
            .with("task_id", "t1")
            .with("command", "echo a && echo b")
            .with("stdout", "a\nb\n");
        let lines = build_content(&tasks::detail(&row));
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

        let stdout_header = text.iter().position(|l| l == "── Stdout ──").unwrap();
        assert_eq!(text[stdout_header + 1], "a");
        assert_eq!(text[stdout_header + 2], "b");
        assert!(text.iter().any(|l| l == "No errors"));
        assert!(text[0].ends_with("Task ID: t1"));
    }
}
