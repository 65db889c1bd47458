//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::provider::{RowSource, load_all};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, Tab};

/// Main TUI application.
pub struct App {
    agents: Arc<dyn RowSource>,
    tasks: Arc<dyn RowSource>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the two dataset sources.
    pub fn new(agents: Arc<dyn RowSource>, tasks: Arc<dyn RowSource>, page_size: usize) -> Self {
        Self {
            agents,
            tasks,
            state: AppState::new(page_size),
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        self.spawn_load(events.sender());

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal even if the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => self.state.tick(),
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Reload => {
                        self.state.begin_loading();
                        self.spawn_load(events.sender());
                    }
                    KeyAction::None => {}
                },
                Ok(Event::Resize) => {}
                Ok(Event::Loaded { tab, rows }) => {
                    debug!(tab = tab.name(), rows = rows.len(), "dataset arrived");
                    self.state.apply_loaded(tab, rows);
                }
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Loads both datasets as one parallel batch on a background thread.
    ///
    /// Failures are logged and show up as empty tables.
    fn spawn_load(&self, tx: Sender<Event>) {
        let agents = Arc::clone(&self.agents);
        let tasks = Arc::clone(&self.tasks);
        info!(agents = agents.name(), tasks = tasks.name(), "loading datasets");

        thread::spawn(move || {
            let mut results = load_all(&[&*agents, &*tasks]).into_iter();
            for tab in [Tab::Agents, Tab::Tasks] {
                let rows = results.next().unwrap_or_default();
                // Receiver gone means the app is shutting down.
                if tx.send(Event::Loaded { tab, rows }).is_err() {
                    break;
                }
            }
        });
    }
}
