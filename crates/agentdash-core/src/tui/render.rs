//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::view::agents::build_agents_view;
use crate::view::tasks::build_tasks_view;

use super::state::{AppState, PopupState, Tab};
use super::widgets::{
    SUMMARY_HEIGHT, render_detail, render_header, render_help, render_quit_confirm,
    render_summary, render_table,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1),              // Header
        Constraint::Length(SUMMARY_HEIGHT), // Summary
        Constraint::Min(5),                 // Table + pagination
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_summary(frame, chunks[1], &state.summary, state.is_loading());

    match state.current_tab {
        Tab::Agents => {
            let vm = build_agents_view(&state.agents.table);
            render_table(frame, chunks[2], &mut state.agents, vm);
        }
        Tab::Tasks => {
            let vm = build_tasks_view(&state.tasks.table);
            render_table(frame, chunks[2], &mut state.tasks, vm);
        }
    }

    // Popups last, over everything.
    if state.popup.is_detail_open() {
        render_detail(frame, area, state);
        return;
    }
    match &mut state.popup {
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::Help { scroll } => render_help(frame, area, state.current_tab, scroll),
        _ => {}
    }
}
