//! Application state management.

use chrono::{DateTime, Local};
use ratatui::widgets::TableState as RatatuiTableState;

use crate::summary::DashboardSummary;
use crate::table::TableView;
use crate::value::Row;
use crate::view::{agents, tasks};

/// Ticks a status message stays on screen.
const STATUS_TICKS: u8 = 12;

/// Available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Agents,
    Tasks,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Agents, Tab::Tasks]
    }

    /// Returns the display name of the tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Agents => "Agents",
            Tab::Tasks => "Tasks",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Agents => Tab::Tasks,
            Tab::Tasks => Tab::Agents,
        }
    }

    pub fn prev(&self) -> Tab {
        // Two tabs: previous and next coincide.
        self.next()
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box; the table filters live.
    Search,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help { scroll: usize },
    QuitConfirm,
    /// Agent detail card.
    AgentDetail { agent_id: String, scroll: usize },
    /// Task result card.
    TaskDetail { task_id: String, scroll: usize },
}

impl PopupState {
    /// Returns true if any popup is open.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self, Self::AgentDetail { .. } | Self::TaskDetail { .. })
    }

    /// Scroll offset of a scrollable popup.
    pub fn scroll_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::Help { scroll }
            | Self::AgentDetail { scroll, .. }
            | Self::TaskDetail { scroll, .. } => Some(scroll),
            Self::None | Self::QuitConfirm => None,
        }
    }
}

/// One tab: its table engine plus the row selection within the current page.
#[derive(Debug)]
pub struct TabState {
    pub table: TableView,
    /// Field used as the row's entity ID.
    pub id_key: &'static str,
    /// Selected row index within the visible page.
    pub selected: usize,
    pub ratatui_state: RatatuiTableState,
}

impl TabState {
    pub fn new(table: TableView, id_key: &'static str) -> Self {
        Self {
            table,
            id_key,
            selected: 0,
            ratatui_state: RatatuiTableState::default(),
        }
    }

    /// Number of selectable rows on the current page.
    pub fn selectable_len(&self) -> usize {
        if self.table.is_loading() {
            0
        } else {
            self.table.visible_rows().len()
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let last = self.selectable_len().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(last);
    }

    /// Runs a page or search change on the engine; a changed page resets the selection.
    pub fn update_table(&mut self, f: impl FnOnce(&mut TableView)) {
        let before = self.table.current_page();
        f(&mut self.table);
        if self.table.current_page() != before {
            self.selected = 0;
        }
    }

    /// Advances the sort to the column after the current sort column.
    ///
    /// Returns the new sort key.
    pub fn next_sort_column(&mut self) -> Option<String> {
        let columns = self.table.columns();
        if columns.is_empty() {
            return None;
        }
        let next = match self.table.sort_key() {
            Some(key) => columns
                .iter()
                .position(|c| c.key == key)
                .map_or(0, |i| (i + 1) % columns.len()),
            None => 0,
        };
        let key = columns[next].key.clone();
        self.table.set_sort(&key);
        Some(key)
    }

    /// Re-applies the current sort key, reversing its direction.
    ///
    /// Returns false when no sort column is active.
    pub fn reverse_sort(&mut self) -> bool {
        match self.table.sort_key().map(str::to_string) {
            Some(key) => {
                self.table.set_sort(&key);
                true
            }
            None => false,
        }
    }

    /// ID of the selected row, if a real row with a non-blank ID is selected.
    ///
    /// Rows without an ID cannot be told apart by lookup, so they have none.
    pub fn selected_id(&self) -> Option<String> {
        if self.table.is_loading() {
            return None;
        }
        self.table
            .visible_rows()
            .get(self.selected)
            .and_then(|v| v.row())
            .map(|row| row.display(self.id_key))
            .filter(|id| !id.trim().is_empty())
    }

    /// Clamps the selection to `len` rendered rows and syncs the ratatui state.
    pub fn resolve_selection(&mut self, len: usize) {
        if len == 0 || self.table.is_loading() {
            self.selected = 0;
            self.ratatui_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.ratatui_state.select(Some(self.selected));
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub current_tab: Tab,
    pub input_mode: InputMode,
    /// Search box contents while in [`InputMode::Search`].
    pub search_input: String,
    pub agents: TabState,
    pub tasks: TabState,
    pub popup: PopupState,
    /// Transient message shown in the header.
    pub status_message: Option<String>,
    status_ticks: u8,
    pub summary: DashboardSummary,
    /// When the last complete load arrived.
    pub loaded_at: Option<DateTime<Local>>,
}

impl AppState {
    /// Creates the state with both tables in loading state.
    pub fn new(page_size: usize) -> Self {
        let mut state = Self {
            current_tab: Tab::Agents,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            agents: TabState::new(agents::new_table(page_size), agents::ID_KEY),
            tasks: TabState::new(tasks::new_table(page_size), tasks::ID_KEY),
            popup: PopupState::None,
            status_message: None,
            status_ticks: 0,
            summary: DashboardSummary::default(),
            loaded_at: None,
        };
        state.begin_loading();
        state
    }

    pub fn tab(&self, tab: Tab) -> &TabState {
        match tab {
            Tab::Agents => &self.agents,
            Tab::Tasks => &self.tasks,
        }
    }

    pub fn tab_mut(&mut self, tab: Tab) -> &mut TabState {
        match tab {
            Tab::Agents => &mut self.agents,
            Tab::Tasks => &mut self.tasks,
        }
    }

    pub fn current(&self) -> &TabState {
        self.tab(self.current_tab)
    }

    pub fn current_mut(&mut self) -> &mut TabState {
        self.tab_mut(self.current_tab)
    }

    pub fn switch_tab(&mut self, new_tab: Tab) {
        if self.current_tab != new_tab {
            self.current_tab = new_tab;
            self.search_input = self.current().table.search_text().to_string();
        }
    }

    /// Puts both tables into loading state.
    pub fn begin_loading(&mut self) {
        self.agents.table.set_loading(true);
        self.tasks.table.set_loading(true);
        self.agents.selected = 0;
        self.tasks.selected = 0;
    }

    pub fn is_loading(&self) -> bool {
        self.agents.table.is_loading() || self.tasks.table.is_loading()
    }

    /// Replaces a tab's rows with a freshly loaded dataset.
    ///
    /// Supplying rows resets the tab's search, sort and page.
    pub fn apply_loaded(&mut self, tab: Tab, rows: Vec<Row>) {
        let tab_state = self.tab_mut(tab);
        tab_state.table.set_rows(rows);
        tab_state.selected = 0;
        if tab == self.current_tab {
            self.search_input.clear();
        }
        self.summary =
            DashboardSummary::from_rows(self.agents.table.rows(), self.tasks.table.rows());
        if !self.is_loading() {
            self.loaded_at = Some(Local::now());
        }
    }

    /// Shows a transient message in the header.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Ages the status message; called on every timer tick.
    pub fn tick(&mut self) {
        if self.status_message.is_some() {
            self.status_ticks = self.status_ticks.saturating_sub(1);
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// Opens the detail popup for the selected row of the current tab.
    pub fn open_detail(&mut self) {
        let Some(id) = self.current().selected_id() else {
            if self.current().selectable_len() > 0 {
                self.set_status("Selected row has no ID");
            }
            return;
        };
        self.popup = match self.current_tab {
            Tab::Agents => PopupState::AgentDetail {
                agent_id: id,
                scroll: 0,
            },
            Tab::Tasks => PopupState::TaskDetail {
                task_id: id,
                scroll: 0,
            },
        };
    }
}
