//! Column type resolution.
//!
//! Two mappings live here. The [`TypeRegistry`] turns a native column type into
//! the scalar used in `@property` doc annotations and `keyType`, and may be
//! extended from configuration. [`fold_cast_type`] is the fixed folding used
//! for the `casts` map and validation rules.

use std::collections::BTreeMap;

/// Scalar used when a native type has no registered mapping.
pub const FALLBACK_TYPE: &str = "mixed";

/// Built-in native type to scalar mappings.
const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("array", "array"),
    ("simple_array", "array"),
    ("json_array", "string"),
    ("bigint", "integer"),
    ("boolean", "boolean"),
    ("datetime", "string"),
    ("datetimetz", "string"),
    ("date", "string"),
    ("time", "string"),
    ("decimal", "float"),
    ("integer", "int"),
    ("object", "object"),
    ("smallint", "integer"),
    ("string", "string"),
    ("text", "string"),
    ("binary", "string"),
    ("blob", "string"),
    ("float", "float"),
    ("guid", "string"),
];

/// Maps native column types to scalar type names.
///
/// Entries can be added or overwritten, never removed.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|(native, scalar)| (native.to_string(), scalar.to_string()))
                .collect(),
        }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overwrites) a mapping.
    pub fn register(&mut self, native: impl Into<String>, scalar: impl Into<String>) {
        let native = native.into();
        let scalar = scalar.into();
        tracing::debug!(native = %native, scalar = %scalar, "registered column type");
        self.types.insert(native, scalar);
    }

    /// Resolves a native type, falling back to `mixed`.
    pub fn resolve(&self, native: &str) -> &str {
        self.types
            .get(native)
            .map(String::as_str)
            .unwrap_or(FALLBACK_TYPE)
    }
}

/// Folds a native column type into the cast type used for `casts` and rules.
///
/// Types without a folding rule pass through unchanged.
pub fn fold_cast_type(native: &str) -> &str {
    match native {
        "json" => "array",
        "text" | "datetimetz" | "guid" | "blob" => "string",
        "decimal" => "float",
        "smallint" | "bigint" => "integer",
        other => other,
    }
}
