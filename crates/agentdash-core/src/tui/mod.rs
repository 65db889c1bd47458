//! Terminal user interface for the agent dashboard.
//!
//! Two tabs (agents, tasks), each a searchable, sortable, paginated table
//! with drill-down detail popups.

mod app;
mod event;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, PopupState, Tab};
