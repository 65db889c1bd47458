//! Row sources: where datasets come from.
//!
//! The TUI never talks to a source directly from the render path. It loads
//! through [`load_or_empty`], which logs failures and falls back to an empty
//! dataset, so a broken source degrades to an empty table instead of an error.

pub mod demo;
mod file;

pub use file::JsonFileSource;

use std::thread;

use tracing::{info, warn};

use crate::error::SourceError;
use crate::value::Row;

/// A dataset provider.
///
/// Object-safe; the application holds sources as `Arc<dyn RowSource>` so they
/// can be handed to loader threads.
pub trait RowSource: Send + Sync {
    /// Short human-readable name, used in logs and the header.
    fn name(&self) -> &str;

    /// Loads the full dataset.
    fn load(&self) -> Result<Vec<Row>, SourceError>;
}

/// Fixed in-memory rows.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    rows: Vec<Row>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// A source that always yields no rows.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

impl RowSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// Loads `source`, logging and returning an empty dataset on failure.
pub fn load_or_empty(source: &dyn RowSource) -> Vec<Row> {
    match source.load() {
        Ok(rows) => {
            info!(source = source.name(), rows = rows.len(), "dataset loaded");
            rows
        }
        Err(e) => {
            warn!(source = source.name(), error = %e, "dataset load failed, using empty dataset");
            Vec::new()
        }
    }
}

/// Loads every source in one parallel batch. Results keep input order.
///
/// A loader that panics is logged and yields an empty dataset, like any other
/// failed load.
pub fn load_all(sources: &[&dyn RowSource]) -> Vec<Vec<Row>> {
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|&source| (source, scope.spawn(move || load_or_empty(source))))
            .collect();
        handles
            .into_iter()
            .map(|(source, handle)| match handle.join() {
                Ok(rows) => rows,
                Err(_) => {
                    warn!(source = source.name(), "loader thread panicked, using empty dataset");
                    Vec::new()
                }
            })
            .collect()
    })
}
