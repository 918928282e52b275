//! SQLite schema introspection.
//!
//! Reads table metadata through `sqlite_master` and the `table_info`,
//! `foreign_key_list`, `index_list` and `index_info` pragmas, then normalises
//! declared column types to the portable names used by the type registry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rusqlite::{Connection, OpenFlags};

use crate::diagnostic::Result;
use super::{Column, ForeignKey, Index, Schema, SchemaSource, Table};

/// Introspects a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteSchemaSource {
    path: PathBuf,
    prefix: String,
}

impl SqliteSchemaSource {
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    /// Reads the schema visible through an open connection.
    pub fn read_connection(conn: &Connection, prefix: &str) -> Result<Schema> {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            tables.push(read_table(conn, &name)?);
        }

        resolve_implicit_references(&mut tables);

        Ok(Schema {
            prefix: prefix.to_string(),
            tables,
        })
    }
}

impl SchemaSource for SqliteSchemaSource {
    fn describe(&self) -> String {
        format!("sqlite {}", self.path.display())
    }

    fn load(&mut self) -> Result<Schema> {
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let schema = Self::read_connection(&conn, &self.prefix)?;
        tracing::debug!(
            path = %self.path.display(),
            tables = schema.tables.len(),
            "introspected sqlite schema"
        );
        Ok(schema)
    }
}

fn read_table(conn: &Connection, name: &str) -> Result<Table> {
    let mut table = Table::new(name);
    let quoted = quote_identifier(name);

    // Columns and primary key
    let mut pk_positions: Vec<(i64, String)> = Vec::new();
    let mut declared_types: Vec<String> = Vec::new();
    {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quoted))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let column_name: String = row.get(1)?;
            let declared: String = row.get::<_, Option<String>>(2)?.unwrap_or_default();
            let not_null: i64 = row.get(3)?;
            let default: Option<String> = row.get(4)?;
            let pk_position: i64 = row.get(5)?;

            let (native_type, length) = normalize_declared_type(&declared);
            table.columns.push(Column {
                name: column_name.clone(),
                native_type,
                nullable: not_null == 0 && pk_position == 0,
                length,
                autoincrement: false,
                default,
            });
            declared_types.push(declared);

            if pk_position > 0 {
                pk_positions.push((pk_position, column_name));
            }
        }
    }
    pk_positions.sort_by_key(|(position, _)| *position);
    table.primary_key = pk_positions.into_iter().map(|(_, name)| name).collect();

    // A lone INTEGER PRIMARY KEY aliases the rowid and auto-increments.
    if table.primary_key.len() == 1 {
        let pk = &table.primary_key[0];
        if let Some(index) = table.columns.iter().position(|c| &c.name == pk) {
            if declared_types[index].trim().eq_ignore_ascii_case("integer") {
                table.columns[index].autoincrement = true;
            }
        }
    }

    // Foreign keys, grouped by constraint id
    {
        let mut grouped: BTreeMap<i64, ForeignKey> = BTreeMap::new();
        let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", quoted))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let foreign_table: String = row.get(2)?;
            let from: String = row.get(3)?;
            let to: Option<String> = row.get(4)?;

            let entry = grouped.entry(id).or_insert_with(|| ForeignKey {
                name: None,
                local_columns: Vec::new(),
                foreign_table,
                foreign_columns: Vec::new(),
            });
            entry.local_columns.push(from);
            if let Some(to) = to {
                entry.foreign_columns.push(to);
            }
        }
        table.foreign_keys = grouped.into_values().collect();
    }

    // Indexes
    {
        let mut listed: Vec<(String, bool)> = Vec::new();
        let mut stmt = conn.prepare(&format!("PRAGMA index_list({})", quoted))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let index_name: String = row.get(1)?;
            let unique: i64 = row.get(2)?;
            listed.push((index_name, unique != 0));
        }

        for (index_name, unique) in listed {
            let mut stmt =
                conn.prepare(&format!("PRAGMA index_info({})", quote_identifier(&index_name)))?;
            let columns = stmt
                .query_map([], |row| row.get::<_, Option<String>>(2))?
                .collect::<std::result::Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect();
            table.indexes.push(Index {
                name: Some(index_name),
                columns,
                unique,
            });
        }
    }

    Ok(table)
}

/// Foreign keys declared as `REFERENCES parent` name no target column; they
/// point at the parent's primary key.
fn resolve_implicit_references(tables: &mut [Table]) {
    let primary_keys: BTreeMap<String, Vec<String>> = tables
        .iter()
        .map(|t| (t.name.clone(), t.primary_key.clone()))
        .collect();

    for table in tables.iter_mut() {
        for fk in table.foreign_keys.iter_mut() {
            if fk.foreign_columns.is_empty() {
                if let Some(pk) = primary_keys.get(&fk.foreign_table) {
                    fk.foreign_columns = pk.clone();
                }
            }
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Maps a declared SQL column type to a portable native type name and length.
///
/// Unknown declarations are passed through lower-cased so that user-registered
/// types can still resolve.
pub fn normalize_declared_type(declared: &str) -> (String, Option<u32>) {
    let lower = declared.trim().to_lowercase();
    let (base, args) = match lower.find('(') {
        Some(open) => (
            lower[..open].trim(),
            lower[open + 1..].trim_end_matches(')').trim(),
        ),
        None => (lower.as_str(), ""),
    };

    let native = match base {
        "" => "string",
        "int" | "integer" | "mediumint" | "int4" => "integer",
        "bigint" | "int8" | "unsigned big int" => "bigint",
        "smallint" | "tinyint" | "int2" => "smallint",
        "boolean" | "bool" => "boolean",
        "varchar" | "character varying" | "varying character" | "nvarchar" | "char"
        | "nchar" | "character" | "native character" | "string" => "string",
        "text" | "clob" | "tinytext" | "mediumtext" | "longtext" => "text",
        "real" | "double" | "double precision" | "float" => "float",
        "decimal" | "numeric" => "decimal",
        "date" => "date",
        "datetime" | "timestamp" => "datetime",
        "datetimetz" | "timestamptz" => "datetimetz",
        "time" => "time",
        "json" | "jsonb" => "json",
        "blob" | "binary" | "varbinary" => "blob",
        "uuid" | "guid" => "guid",
        other if other.contains("int") => "integer",
        other if other.contains("char") || other.contains("clob") || other.contains("text") => {
            "text"
        }
        other => other,
    };

    let length = if native == "string" {
        args.parse::<u32>().ok()
    } else {
        None
    };

    (native.to_string(), length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (
                 id INTEGER PRIMARY KEY,
                 email VARCHAR(120) NOT NULL UNIQUE,
                 created_at DATETIME,
                 updated_at DATETIME
             );
             CREATE TABLE posts (
                 id INTEGER PRIMARY KEY,
                 user_id INTEGER NOT NULL REFERENCES users(id),
                 title VARCHAR(50) NOT NULL,
                 body TEXT,
                 price DECIMAL(8, 2) DEFAULT 0
             );
             CREATE TABLE profiles (
                 id INTEGER PRIMARY KEY,
                 user_id INTEGER NOT NULL REFERENCES users
             );
             CREATE UNIQUE INDEX profiles_user_id_unique ON profiles(user_id);
             CREATE TABLE tags (
                 code TEXT PRIMARY KEY
             );
             CREATE TABLE post_tag (
                 post_id INTEGER NOT NULL REFERENCES posts(id),
                 tag_code TEXT NOT NULL REFERENCES tags(code)
             );",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_reads_tables_in_name_order() {
        let conn = blog_connection();
        let schema = SqliteSchemaSource::read_connection(&conn, "").unwrap();
        assert_eq!(
            schema.table_names(),
            vec!["post_tag", "posts", "profiles", "tags", "users"]
        );
    }

    #[test]
    fn test_reads_columns_and_primary_key() {
        let conn = blog_connection();
        let schema = SqliteSchemaSource::read_connection(&conn, "").unwrap();
        let posts = schema.table("posts").unwrap();

        assert_eq!(posts.primary_key, vec!["id"]);
        assert!(posts.column("id").unwrap().autoincrement);

        let title = posts.column("title").unwrap();
        assert_eq!(title.native_type, "string");
        assert_eq!(title.length, Some(50));
        assert!(!title.nullable);

        let body = posts.column("body").unwrap();
        assert_eq!(body.native_type, "text");
        assert!(body.nullable);

        let price = posts.column("price").unwrap();
        assert_eq!(price.native_type, "decimal");
        assert_eq!(price.default.as_deref(), Some("0"));
    }

    #[test]
    fn test_text_primary_key_is_not_autoincrement() {
        let conn = blog_connection();
        let schema = SqliteSchemaSource::read_connection(&conn, "").unwrap();
        let tags = schema.table("tags").unwrap();
        assert_eq!(tags.primary_key, vec!["code"]);
        assert!(!tags.column("code").unwrap().autoincrement);
    }

    #[test]
    fn test_reads_foreign_keys() {
        let conn = blog_connection();
        let schema = SqliteSchemaSource::read_connection(&conn, "").unwrap();

        let posts = schema.table("posts").unwrap();
        assert_eq!(posts.foreign_keys, vec![ForeignKey::new("user_id", "users", "id")]);

        let profiles = schema.table("profiles").unwrap();
        assert_eq!(profiles.foreign_keys[0].foreign_columns, vec!["id"]);

        let pivot = schema.table("post_tag").unwrap();
        assert_eq!(pivot.foreign_keys.len(), 2);
    }

    #[test]
    fn test_reads_unique_indexes() {
        let conn = blog_connection();
        let schema = SqliteSchemaSource::read_connection(&conn, "").unwrap();

        assert!(schema.table("profiles").unwrap().is_column_unique("user_id"));
        assert!(schema.table("users").unwrap().is_column_unique("email"));
        assert!(!schema.table("posts").unwrap().is_column_unique("user_id"));
    }

    #[test]
    fn test_normalize_declared_type() {
        assert_eq!(normalize_declared_type("VARCHAR(255)"), ("string".to_string(), Some(255)));
        assert_eq!(normalize_declared_type("INTEGER"), ("integer".to_string(), None));
        assert_eq!(normalize_declared_type("BIGINT"), ("bigint".to_string(), None));
        assert_eq!(normalize_declared_type("decimal(8, 2)"), ("decimal".to_string(), None));
        assert_eq!(normalize_declared_type("TIMESTAMP"), ("datetime".to_string(), None));
        assert_eq!(normalize_declared_type("jsonb"), ("json".to_string(), None));
        assert_eq!(normalize_declared_type("UNSIGNED INTEGER"), ("integer".to_string(), None));
        assert_eq!(normalize_declared_type("enum"), ("enum".to_string(), None));
        assert_eq!(normalize_declared_type(""), ("string".to_string(), None));
    }
}
