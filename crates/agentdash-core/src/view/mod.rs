//! UI-agnostic view models.
//!
//! Each sub-module builds a [`common::TableViewModel`] from a
//! [`crate::table::TableView`]. The TUI (or any other frontend) then maps the
//! view model to framework-specific widgets for rendering.

pub mod agents;
pub mod common;
pub mod tasks;
