//! Column driven members: `fillable`, `casts`, `rules` and friends.

use super::{model_table, Processor};
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::{Capability, Model, Property, Value, VirtualProperty, Visibility};
use crate::naming::translation_table_name;
use crate::schema::{Column, Schema, Table};
use crate::types::{fold_cast_type, TypeRegistry};

const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// Extracts per-column members from the model's table.
pub struct FieldProcessor<'a> {
    schema: &'a Schema,
    registry: &'a TypeRegistry,
}

impl<'a> FieldProcessor<'a> {
    pub fn new(schema: &'a Schema, registry: &'a TypeRegistry) -> Self {
        Self { schema, registry }
    }

    fn process_translation(&self, model: &mut Model) {
        let name = self.schema.prefixed(&translation_table_name(&model.table_name));
        let Some(translations) = self.schema.table(&name) else {
            return;
        };

        let attributes = translated_attributes(translations);
        tracing::debug!(table = %name, count = attributes.len(), "translation table found");
        model.add_property(
            Property::new("translatedAttributes", Visibility::Public, Value::List(attributes))
                .with_doc(&["@var array"]),
        );
        model.add_capability(Capability::Translatable);
    }
}

impl Processor for FieldProcessor<'_> {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn process(&self, model: &mut Model, _config: &mut Config) -> Result<()> {
        let table = model_table(self.schema, model)?;

        model.add_property(
            Property::new("table", Visibility::Protected, Value::str(table.name.as_str()))
                .with_doc(&["@var string"]),
        );

        self.process_translation(model);

        let mut fillable = Vec::new();
        let mut casts = Vec::new();
        let mut rules = Vec::new();
        let mut timestamps = 0;

        for column in &table.columns {
            model.add_virtual_property(VirtualProperty {
                name: column.name.clone(),
                typ: self.registry.resolve(&column.native_type).to_string(),
                nullable: column.nullable,
            });

            let cast = fold_cast_type(&column.native_type);
            if TIMESTAMP_COLUMNS.contains(&column.name.as_str()) {
                timestamps += 1;
            } else if table.primary_key.contains(&column.name) {
                casts.push((column.name.clone(), cast.to_string()));
            } else {
                fillable.push(column.name.clone());
                casts.push((column.name.clone(), cast.to_string()));
                rules.push((column.name.clone(), validation_rules(column, cast)));
            }
        }

        for (name, visibility) in [
            ("blockingRelations", Visibility::Public),
            ("relationsToDelete", Visibility::Public),
            ("touches", Visibility::Protected),
        ] {
            model.add_property(
                Property::new(name, visibility, Value::empty_list()).with_doc(&["@var array"]),
            );
        }

        let soft_deletes = fillable.iter().any(|c| c == "deleted_at");

        model.add_property(
            Property::new("fillable", Visibility::Protected, Value::List(fillable))
                .with_doc(&["@var array"]),
        );
        model.add_property(
            Property::new("casts", Visibility::Protected, Value::Map(casts))
                .with_doc(&["@var array"]),
        );
        model.add_property(
            Property::new("rules", Visibility::Public, Value::Map(rules))
                .with_static()
                .with_doc(&["@var array"]),
        );

        if soft_deletes {
            model.add_capability(Capability::SoftDelete);
        }
        if timestamps < TIMESTAMP_COLUMNS.len() {
            model.add_property(
                Property::new("timestamps", Visibility::Public, Value::Bool(false))
                    .with_doc(&["@var bool"]),
            );
        }

        Ok(())
    }
}

/// Columns of a translation table that hold translated values.
fn translated_attributes(translations: &Table) -> Vec<String> {
    let mut excluded: Vec<&str> = translations.primary_key.iter().map(String::as_str).collect();
    for fk in &translations.foreign_keys {
        excluded.extend(fk.local_columns.iter().map(String::as_str));
    }
    excluded.push("locale");

    translations
        .column_names()
        .filter(|c| !excluded.contains(c))
        .map(str::to_string)
        .collect()
}

/// Pipe-joined validation rules for a column given its folded cast type.
pub fn validation_rules(column: &Column, cast: &str) -> String {
    let mut rules = vec![if column.nullable { "nullable" } else { "required" }.to_string()];
    match cast {
        "string" => {
            if let Some(length) = column.length {
                rules.push(format!("max:{length}"));
            }
        }
        "integer" => rules.push("integer".to_string()),
        "float" => rules.push("numeric".to_string()),
        "boolean" => rules.push("boolean".to_string()),
        "date" | "datetime" => rules.push("date".to_string()),
        _ => {}
    }
    rules.join("|")
}
