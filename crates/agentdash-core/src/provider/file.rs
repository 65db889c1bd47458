//! JSON file source.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use super::RowSource;
use crate::error::SourceError;
use crate::value::Row;

/// Reads a file holding a top-level JSON array of objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl RowSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Row>, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let Value::Array(items) = value else {
            return Err(SourceError::NotAnArray {
                path: self.path.clone(),
            });
        };

        let total = items.len();
        let rows: Vec<Row> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let row = Row::from_json(item);
                if row.is_none() {
                    warn!(path = %self.path.display(), index = i, "skipping non-object array element");
                }
                row
            })
            .collect();
        debug!(path = %self.path.display(), total, rows = rows.len(), "parsed JSON dataset");
        Ok(rows)
    }
}
