//! Database schema metadata.
//!
//! The generator never talks to a database directly while building a model.
//! A [`SchemaSource`] produces a [`Schema`] snapshot up front, and every
//! processor reads from that snapshot.

mod snapshot;
mod source;
mod sqlite;

pub use snapshot::{save_snapshot, JsonSchemaSource};
pub use source::{open_source, SchemaSource};
pub use sqlite::{normalize_declared_type, SqliteSchemaSource};

use serde::{Deserialize, Serialize};

/// A single table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    /// Portable native type name (`integer`, `string`, `datetime`, ...).
    #[serde(rename = "type")]
    pub native_type: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default)]
    pub autoincrement: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable: false,
            length: None,
            autoincrement: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }
}

/// A foreign key constraint declared on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub local_columns: Vec<String>,
    pub foreign_table: String,
    pub foreign_columns: Vec<String>,
}

impl ForeignKey {
    /// Single-column foreign key.
    pub fn new(local_column: &str, foreign_table: &str, foreign_column: &str) -> Self {
        Self {
            name: None,
            local_columns: vec![local_column.to_string()],
            foreign_table: foreign_table.to_string(),
            foreign_columns: vec![foreign_column.to_string()],
        }
    }
}

/// An index declared on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Metadata for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an auto-incrementing integer `id` primary key.
    pub fn with_id(mut self) -> Self {
        self.columns.push(Column::new("id", "integer").autoincrement());
        self.primary_key = vec!["id".to_string()];
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn with_unique_index(mut self, columns: &[&str]) -> Self {
        self.indexes.push(Index {
            name: None,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: true,
        });
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Whether `column` is covered by a single-column unique index. A
    /// single-column primary key counts as one.
    pub fn is_column_unique(&self, column: &str) -> bool {
        if matches!(self.primary_key.as_slice(), [key] if key == column) {
            return true;
        }
        self.indexes
            .iter()
            .any(|index| index.unique && index.columns.len() == 1 && index.columns[0] == column)
    }

    /// Whether the table carries both `created_at` and `updated_at`.
    pub fn has_timestamps(&self) -> bool {
        self.has_column("created_at") && self.has_column("updated_at")
    }
}

/// A snapshot of every table reachable through one connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Prefix applied to every physical table name.
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            prefix: String::new(),
            tables,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Looks up a table by its physical (prefixed) name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Physical name for a logical table name.
    pub fn prefixed(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Logical name for a physical table name.
    pub fn strip_prefix<'a>(&self, name: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            return name;
        }
        name.strip_prefix(self.prefix.as_str()).unwrap_or(name)
    }
}
