//! JSON schema snapshots.
//!
//! A snapshot is the serialized form of [`Schema`]. It lets the generator run
//! against a database it cannot reach, and keeps tests independent of a live
//! connection.

use std::path::{Path, PathBuf};

use crate::diagnostic::{GeneratorError, Result};
use super::{Schema, SchemaSource};

/// Loads a [`Schema`] from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSchemaSource {
    path: PathBuf,
    prefix: String,
}

impl JsonSchemaSource {
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    /// Parses snapshot text. A non-empty configured prefix overrides the one
    /// recorded in the snapshot.
    pub fn parse(content: &str, path: &Path, prefix: &str) -> Result<Schema> {
        let mut schema: Schema =
            serde_json::from_str(content).map_err(|e| GeneratorError::SchemaLoad {
                path: path.to_path_buf(),
                message: format!("Failed to parse schema snapshot: {}", e),
            })?;

        if !prefix.is_empty() {
            schema.prefix = prefix.to_string();
        }

        Ok(schema)
    }
}

impl SchemaSource for JsonSchemaSource {
    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    fn load(&mut self) -> Result<Schema> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| GeneratorError::SchemaLoad {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let schema = Self::parse(&content, &self.path, &self.prefix)?;
        tracing::debug!(
            path = %self.path.display(),
            tables = schema.tables.len(),
            "loaded schema snapshot"
        );
        Ok(schema)
    }
}

/// Writes a schema snapshot to disk.
pub fn save_snapshot(schema: &Schema, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }
    }

    let content = serde_json::to_string_pretty(schema).map_err(|e| {
        GeneratorError::io(path, format!("Failed to serialize schema snapshot: {}", e))
    })?;

    std::fs::write(path, content).map_err(|e| GeneratorError::io(path, e.to_string()))
}
