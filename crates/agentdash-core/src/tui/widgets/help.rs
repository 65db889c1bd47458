//! Help popup: keybindings plus the current tab's columns.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::state::Tab;
use crate::tui::style::Styles;
use crate::view::{agents, tasks};

use super::popup::{render_popup_frame, section};

const KEYS: &[(&str, &str)] = &[
    ("1 / 2", "Agents / Tasks tab"),
    ("Tab, Shift-Tab", "Next / previous tab"),
    ("↑ ↓", "Select row on the page"),
    ("← → PgUp PgDn", "Previous / next page"),
    ("Home End", "First / last page"),
    ("/", "Search (Enter keeps, Esc clears)"),
    ("Esc", "Clear search"),
    ("s", "Sort by next column"),
    ("r", "Reverse sort direction"),
    ("Enter", "Open details"),
    ("R", "Reload datasets"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", key), Styles::help_key()),
        Span::raw(desc.to_string()),
    ])
}

/// Help text for `tab`.
pub fn help_content(tab: Tab) -> Vec<Line<'static>> {
    let mut lines = vec![section("Keys")];
    lines.extend(KEYS.iter().map(|(k, d)| key_line(k, d)));

    let columns = match tab {
        Tab::Agents => agents::columns(),
        Tab::Tasks => tasks::columns(),
    };
    lines.push(Line::from(""));
    lines.push(section(&format!("{} columns", tab.name())));
    lines.extend(
        columns
            .iter()
            .map(|c| key_line(&c.label, &format!("field `{}`", c.key))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Search matches any column's raw value, ignoring case.",
        Styles::help(),
    )));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, tab: Tab, scroll: &mut usize) {
    render_popup_frame(frame, area, "Help", help_content(tab), scroll);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_tab_columns() {
        let text: Vec<String> = help_content(Tab::Tasks)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert!(text.iter().any(|l| l == "── Tasks columns ──"));
        assert!(text.iter().any(|l| l.contains("Command") && l.contains("`command`")));
        assert!(!text.iter().any(|l| l.contains("`ip`")));
    }
}
