//! agentdash-core: library behind the `agentdash` terminal dashboard.
//!
//! Provides:
//! - `value`: row data model (field name → displayable value)
//! - `table`: generic table view state (search, sort, pagination)
//! - `view`: UI-agnostic view models for agents and tasks
//! - `summary`: dashboard aggregates
//! - `provider`: dataset sources (JSON files, demo data)
//! - `fmt`: shared formatting helpers
//!
//! With `tui` feature (default):
//! - `tui`: TUI rendering (ratatui/crossterm), state, input, widgets

pub mod error;
pub mod fmt;
pub mod provider;
pub mod summary;
pub mod table;
pub mod value;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
