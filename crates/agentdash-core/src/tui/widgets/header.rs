//! Header widget showing time, tabs, dataset status and search input.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Min(20),    // Tabs
        Constraint::Length(18), // Dataset status
        Constraint::Length(36), // Search/status
    ])
    .split(area);

    let time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time).style(Styles::header()), chunks[0]);

    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", i + 1), Styles::dim()),
                Span::styled(format!("{} ", tab.name()), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[1],
    );

    let dataset = if state.is_loading() {
        " loading…".to_string()
    } else {
        state
            .loaded_at
            .map(|t| format!(" loaded {}", t.format("%H:%M:%S")))
            .unwrap_or_default()
    };
    frame.render_widget(Paragraph::new(dataset).style(Styles::header()), chunks[2]);

    let (right, style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status_message())
    } else {
        match state.input_mode {
            InputMode::Search => (
                format!("Search: {}█", state.search_input),
                Styles::search_input(),
            ),
            InputMode::Normal => {
                let search = state.current().table.search_text();
                let text = if search.is_empty() {
                    String::new()
                } else {
                    format!("/{}", search)
                };
                (text, Styles::header())
            }
        }
    };
    frame.render_widget(Paragraph::new(right).style(style), chunks[3]);
}
