//! Generator configuration.
//!
//! A [`Config`] is a flat map of normalised keys built from three layers:
//! invocation arguments, the application file (`modelgen.toml`) and built-in
//! defaults. A higher layer overrides a lower one only with a non-null value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostic::{GeneratorError, Result};

/// Application configuration file looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "modelgen.toml";

/// Companion artifacts switched on by `all`.
const ALL_ARTIFACTS: &[&str] = &["controller", "routes", "request", "repository"];

/// Companion artifacts switched on by `all_api`.
const ALL_API_ARTIFACTS: &[&str] = &[
    "api_controller",
    "api_routes",
    "request",
    "repository",
    "resource",
];

/// Every scaffolding toggle, off unless requested.
const TOGGLES: &[&str] = &[
    "controller",
    "api_controller",
    "routes",
    "api_routes",
    "request",
    "resource",
    "repository",
    "all",
    "all_api",
];

/// Normalises a key: lower-case, `-` replaced by `_`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('-', "_")
}

/// Built-in defaults, the lowest layer.
pub fn default_values() -> BTreeMap<String, Value> {
    let strings = [
        ("base_class_name", "Illuminate\\Database\\Eloquent\\Model"),
        ("namespace", "App\\Models"),
        ("output_path", "Models"),
        ("except_tables", "migrations,users,password_resets"),
        ("controller_path", ""),
        ("routes_path", "routes/web.php"),
        ("api_routes_path", "routes/api.php"),
        ("request_namespace", "App\\Http\\Requests"),
        ("request_path", "Http/Requests"),
        ("resource_namespace", "App\\Http\\Resources"),
        ("resource_path", "Http/Resources"),
        ("repository_namespace", "App\\Repositories"),
        ("repository_path", "Repositories"),
        ("app_path", "app"),
        ("app_namespace", "App"),
        ("table_prefix", ""),
        ("schema", "schema.json"),
    ];

    let mut values: BTreeMap<String, Value> = strings
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    for key in ["no_timestamps", "date_format", "connection"] {
        values.insert(key.to_string(), Value::Null);
    }
    for key in TOGGLES {
        values.insert(key.to_string(), Value::Bool(false));
    }
    values
}

/// Merged configuration for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Config {
    /// Merges invocation arguments over the application file over the defaults.
    pub fn new<I, K>(input: I, app: Option<&AppConfig>) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut values = default_values();

        if let Some(app) = app {
            merge(&mut values, app.model_defaults.iter().map(|(k, v)| (k.as_str(), v.clone())));
            if !app.db_types.is_empty() {
                let types = app
                    .db_types
                    .iter()
                    .map(|(native, scalar)| (native.clone(), Value::String(scalar.clone())))
                    .collect();
                values.insert("db_types".to_string(), Value::Object(types));
            }
        }

        let input: Vec<(K, Value)> = input.into_iter().collect();
        merge(&mut values, input.iter().map(|(k, v)| (k.as_ref(), v.clone())));

        let mut config = Self { values };
        config.expand_shortcuts();
        config
    }

    /// Configuration built from the defaults alone.
    pub fn defaults() -> Self {
        Self::new(std::iter::empty::<(&str, Value)>(), None)
    }

    /// Value for `key`, `None` when absent or null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&normalize_key(key)).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Like [`Config::get_str`] but fails when the key is missing.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key).ok_or_else(|| GeneratorError::MissingConfig {
            key: normalize_key(key),
        })
    }

    /// Whether `key` is present and non-null.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// A toggle is on unless it is exactly `false`.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.get_bool(key) != Some(false)
    }

    /// Comma separated list value, trimmed and lower-cased.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get_str(key)
            .map(|s| {
                s.split(',')
                    .map(|item| item.trim().to_lowercase())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Native to scalar type mappings from the `[db_types]` table.
    pub fn db_types(&self) -> Vec<(String, String)> {
        match self.get("db_types") {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(native, scalar)| Some((native.clone(), scalar.as_str()?.to_string())))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn expand_shortcuts(&mut self) {
        if self.get_bool("all") == Some(true) {
            for key in ALL_ARTIFACTS {
                self.set(key, true);
            }
        }
        if self.get_bool("all_api") == Some(true) {
            for key in ALL_API_ARTIFACTS {
                self.set(key, true);
            }
        }
    }
}

fn merge<'a>(low: &mut BTreeMap<String, Value>, high: impl Iterator<Item = (&'a str, Value)>) {
    for (key, value) in high {
        if !value.is_null() {
            low.insert(normalize_key(key), value);
        }
    }
}

/// Persisted application configuration.
///
/// ```toml
/// [model_defaults]
/// namespace = "App\\Models"
/// output_path = "Models"
///
/// [db_types]
/// enum = "string"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model_defaults: BTreeMap<String, Value>,
    #[serde(default)]
    pub db_types: BTreeMap<String, String>,
}

impl AppConfig {
    /// Loads the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Loads the file at `path`, or returns an empty configuration when it
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no application config file");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| GeneratorError::ConfigParse {
            path: PathBuf::from(path),
            message: e.to_string(),
        })
    }
}
