//! Schema sources.
//!
//! Each source is responsible for:
//! 1. Reading table metadata from its backing store
//! 2. Normalising it into the common [`Schema`] snapshot

use std::path::Path;

use crate::diagnostic::{GeneratorError, Result};
use super::{JsonSchemaSource, Schema, SqliteSchemaSource};

/// Trait for schema metadata providers.
pub trait SchemaSource {
    /// Human readable description of where the metadata comes from.
    fn describe(&self) -> String;

    /// Loads every table, column, foreign key and index.
    fn load(&mut self) -> Result<Schema>;
}

/// Creates a schema source for the given path, chosen by file extension.
pub fn open_source(path: &Path, prefix: &str) -> Result<Box<dyn SchemaSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonSchemaSource::new(path, prefix))),
        Some("db") | Some("sqlite") | Some("sqlite3") => {
            Ok(Box::new(SqliteSchemaSource::new(path, prefix)))
        }
        _ => Err(GeneratorError::UnsupportedSchemaSource {
            path: path.to_path_buf(),
        }),
    }
}
