//! # Modelgen Compiler
//!
//! Generates Eloquent model classes, and optionally their controllers, routes,
//! requests, resources and repositories, from a database schema.
//!
//! ## Architecture
//!
//! ```text
//! Schema source (JSON snapshot, SQLite)
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Schema    │  Tables, columns, keys, indexes
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Processors  │  Naming, fields, relation inference, custom properties
//! │ (Schema → IR)│
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  PHP model class + companion artifacts
//! │  (IR → PHP)  │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelgen_compiler::{open_source, Config, Generator};
//!
//! let mut source = open_source("schema.json".as_ref(), "")?;
//! let mut generator = Generator::from_source(source.as_mut())?;
//! let config = Config::new([("class_name", "Post".into())], None);
//! let report = generator.generate(&config)?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod ir;
pub mod naming;
pub mod processor;
pub mod relations;
pub mod scaffold;
pub mod schema;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use config::{AppConfig, Config, DEFAULT_CONFIG_FILE};
pub use diagnostic::{GeneratorError, Result};
pub use ir::{Model, Relation};
pub use schema::{open_source, save_snapshot, Schema, SchemaSource};
pub use types::TypeRegistry;

use naming::{default_class_name, is_translation_table};
use processor::ModelBuilder;
use relations::is_relation_table_name;
use scaffold::Scaffolder;

/// Drives model generation against one schema snapshot.
pub struct Generator {
    schema: Schema,
    registry: TypeRegistry,
    root: PathBuf,
}

/// Outcome of generating one model.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub class_name: String,
    /// Logical table name.
    pub table_name: String,
    /// The model file written.
    pub model_path: PathBuf,
    /// Companion files created or updated.
    pub companions: Vec<PathBuf>,
}

impl Generator {
    /// Creates a generator rooted at the current directory.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            registry: TypeRegistry::new(),
            root: PathBuf::from("."),
        }
    }

    /// Loads the schema from `source`.
    pub fn from_source(source: &mut dyn SchemaSource) -> Result<Self> {
        info!(source = %source.describe(), "loading schema");
        Ok(Self::new(source.load()?))
    }

    /// Sets the project root that relative paths resolve against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Builds the in-memory model without writing anything.
    ///
    /// `config` receives the resolved `table_name`.
    pub fn build_model(&mut self, config: &mut Config) -> Result<Model> {
        self.register_user_types(config);
        ModelBuilder::standard(&self.schema, &self.registry).build(config)
    }

    /// Generates one model and its enabled companions.
    ///
    /// This runs the full pipeline:
    /// 1. Register user column types
    /// 2. Build the model through the processors
    /// 3. Render and write the model file
    /// 4. Write companion artifacts
    pub fn generate(&mut self, config: &Config) -> Result<GenerationReport> {
        let mut config = config.clone();

        // Phase 1-2: Build
        let model = self.build_model(&mut config)?;

        // Phase 3: Render and write
        let content = codegen::render_model(&model);
        let dir = self.output_dir(&config);
        prepare_output_dir(&dir)?;
        let model_path = dir.join(format!("{}.php", model.class_name));
        std::fs::write(&model_path, content).map_err(|e| GeneratorError::IoError {
            path: model_path.clone(),
            message: e.to_string(),
        })?;
        info!(class = %model.class_name, path = %model_path.display(), "model written");

        // Phase 4: Companions
        let companions = if is_translation_table(&model.table_name) {
            debug!(table = %model.table_name, "translation table, companions skipped");
            Vec::new()
        } else {
            let app_dir = self.app_dir(&config);
            Scaffolder {
                root: &self.root,
                app_dir: &app_dir,
                config: &config,
            }
            .run(&model)?
        };

        Ok(GenerationReport {
            class_name: model.class_name,
            table_name: model.table_name,
            model_path,
            companions,
        })
    }

    /// Generates a model for every eligible table.
    ///
    /// Tables from other schemas (`schema.table`), tables in `except_tables`
    /// and junction tables are skipped. The first failure aborts the run.
    pub fn generate_all(&mut self, config: &Config) -> Result<Vec<GenerationReport>> {
        let names: Vec<String> = self
            .schema
            .table_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let except = config.get_list("except_tables");

        let mut eligible = Vec::new();
        for name in &names {
            let logical = self.schema.strip_prefix(name).to_string();
            if name.contains('.') {
                debug!(table = %name, "table from another schema, skipped");
                continue;
            }
            if except.contains(&name.to_lowercase()) || except.contains(&logical.to_lowercase()) {
                debug!(table = %name, "table excepted, skipped");
                continue;
            }
            if is_relation_table_name(name, &name_refs) {
                debug!(table = %name, "junction table, skipped");
                continue;
            }
            if is_translation_table(&logical) {
                warn!(
                    table = %name,
                    "translation table: the Translatable package is required to use it"
                );
            }
            eligible.push(logical);
        }

        let mut reports = Vec::with_capacity(eligible.len());
        for table in eligible {
            let mut table_config = config.clone();
            table_config.set("class_name", default_class_name(&table));
            table_config.set("table_name", table);
            reports.push(self.generate(&table_config)?);
        }
        Ok(reports)
    }

    /// Classified relations of a logical table.
    pub fn inspect(&self, table: &str) -> Result<Vec<Relation>> {
        let physical = self.schema.prefixed(table);
        if !self.schema.has_table(&physical) {
            return Err(GeneratorError::TableNotFound { table: physical });
        }
        Ok(relations::classify(&self.schema, table))
    }

    /// Directory the model file is written to.
    pub fn output_dir(&self, config: &Config) -> PathBuf {
        let output = Path::new(config.get_str("output_path").unwrap_or(""));
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.app_dir(config).join(output)
        }
    }

    /// Application directory, `app_path` resolved against the root.
    pub fn app_dir(&self, config: &Config) -> PathBuf {
        let app = Path::new(config.get_str("app_path").unwrap_or("app"));
        if app.is_absolute() {
            app.to_path_buf()
        } else {
            self.root.join(app)
        }
    }

    fn register_user_types(&mut self, config: &Config) {
        for (native, scalar) in config.db_types() {
            self.registry.register(native, scalar);
        }
    }
}

/// Creates the output directory when missing and checks it is writable.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|_| GeneratorError::DirectoryNotCreated {
            path: dir.to_path_buf(),
        })?;
    }
    let metadata = std::fs::metadata(dir).map_err(|e| GeneratorError::IoError {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    if metadata.permissions().readonly() {
        return Err(GeneratorError::NotWritable {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
