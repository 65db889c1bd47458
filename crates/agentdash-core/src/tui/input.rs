//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::table::TableView;

use super::state::{AppState, InputMode, PopupState, Tab};

/// Lines scrolled by PgUp/PgDn inside a popup.
const POPUP_PAGE: usize = 10;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Reload both datasets.
    Reload,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.popup = PopupState::None;
        return KeyAction::Quit;
    }
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    if state.popup.is_open() {
        return handle_popup(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Search => handle_search_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Keys while a help or detail popup is open: scroll or close.
fn handle_popup(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.popup = PopupState::None,
        KeyCode::Char('?') if matches!(state.popup, PopupState::Help { .. }) => {
            state.popup = PopupState::None;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
        code => {
            if let Some(scroll) = state.popup.scroll_mut() {
                match code {
                    KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
                    KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
                    KeyCode::PageUp => *scroll = scroll.saturating_sub(POPUP_PAGE),
                    KeyCode::PageDown => *scroll = scroll.saturating_add(POPUP_PAGE),
                    KeyCode::Home => *scroll = 0,
                    _ => {}
                }
            }
        }
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
        }

        // Tabs
        KeyCode::Tab => state.switch_tab(state.current_tab.next()),
        KeyCode::BackTab => state.switch_tab(state.current_tab.prev()),
        KeyCode::Char('1') => state.switch_tab(Tab::Agents),
        KeyCode::Char('2') => state.switch_tab(Tab::Tasks),

        // Selection within the page
        KeyCode::Up | KeyCode::Char('k') => state.current_mut().select_up(),
        KeyCode::Down | KeyCode::Char('j') => state.current_mut().select_down(),

        // Pages
        KeyCode::Left | KeyCode::PageUp => state.current_mut().update_table(TableView::prev_page),
        KeyCode::Right | KeyCode::PageDown => {
            state.current_mut().update_table(TableView::next_page)
        }
        KeyCode::Home => state.current_mut().update_table(TableView::first_page),
        KeyCode::End => state.current_mut().update_table(TableView::last_page),

        // Sorting
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if let Some(key) = state.current_mut().next_sort_column() {
                tracing::debug!(tab = state.current_tab.name(), key = %key, "sort column");
            }
        }
        KeyCode::Char('r') => {
            if !state.current_mut().reverse_sort() {
                state.set_status("No sort column (press s)");
            }
        }

        // Search
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            state.search_input = state.current().table.search_text().to_string();
        }
        KeyCode::Esc => {
            if !state.current().table.search_text().is_empty() {
                state.search_input.clear();
                state.current_mut().update_table(|t| t.set_search_text(""));
            }
        }

        KeyCode::Enter => state.open_detail(),
        KeyCode::Char('?') | KeyCode::Char('h') => {
            state.popup = PopupState::Help { scroll: 0 };
        }
        KeyCode::Char('R') => {
            state.set_status("Reloading…");
            return KeyAction::Reload;
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel search
            state.input_mode = InputMode::Normal;
            state.search_input.clear();
            apply_search(state);
        }
        KeyCode::Enter => {
            // Already applied while typing
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            apply_search(state);
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            apply_search(state);
        }
        _ => {}
    }
    KeyAction::None
}

/// Pushes the search box contents into the current table.
fn apply_search(state: &mut AppState) {
    let text = state.search_input.clone();
    let tab = state.current_mut();
    tab.table.set_search_text(text);
    tab.selected = 0;
}
