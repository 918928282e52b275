//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while generating a model.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(modelgen::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to parse configuration file '{}': {message}", path.display())]
    #[diagnostic(
        code(modelgen::config::parse_failed),
        help("The configuration file is TOML with optional [model_defaults] and [db_types] tables")
    )]
    ConfigParse {
        path: PathBuf,
        message: String,
    },

    #[error("Missing configuration value: {key}")]
    #[diagnostic(code(modelgen::config::missing_value))]
    MissingConfig {
        key: String,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Failed to load schema from '{}': {message}", path.display())]
    #[diagnostic(code(modelgen::schema::load_failed))]
    SchemaLoad {
        path: PathBuf,
        message: String,
    },

    #[error("Unsupported schema source: {}", path.display())]
    #[diagnostic(
        code(modelgen::schema::unsupported_source),
        help("Use a JSON schema snapshot (.json) or a SQLite database (.db, .sqlite, .sqlite3)")
    )]
    UnsupportedSchemaSource {
        path: PathBuf,
    },

    #[error("Table {table} does not exist")]
    #[diagnostic(
        code(modelgen::schema::table_not_found),
        help("Pass --table-name explicitly or check the configured table prefix")
    )]
    TableNotFound {
        table: String,
    },

    #[error(transparent)]
    #[diagnostic(code(modelgen::schema::database))]
    Database(#[from] rusqlite::Error),

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Could not create directory {}", path.display())]
    #[diagnostic(code(modelgen::output::directory_not_created))]
    DirectoryNotCreated {
        path: PathBuf,
    },

    #[error("{} is not writeable", path.display())]
    #[diagnostic(code(modelgen::output::not_writable))]
    NotWritable {
        path: PathBuf,
    },

    // =========================================================================
    // Scaffolding Errors
    // =========================================================================
    #[error("Failed to generate {artifact}: {message}")]
    #[diagnostic(
        code(modelgen::scaffold::failed),
        help("The model file has already been written; companion files may be incomplete")
    )]
    ScaffoldFailed {
        artifact: String,
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps an error raised while writing a companion artifact.
    pub fn scaffold(artifact: impl Into<String>, source: GeneratorError) -> Self {
        Self::ScaffoldFailed {
            artifact: artifact.into(),
            message: source.to_string(),
        }
    }
}

/// Result alias used throughout the generator.
pub type Result<T> = std::result::Result<T, GeneratorError>;
