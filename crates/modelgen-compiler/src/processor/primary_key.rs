use super::{model_table, Processor};
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::{Model, Property, Value, Visibility};
use crate::naming::DEFAULT_PRIMARY_KEY;
use crate::schema::Schema;
use crate::types::TypeRegistry;

/// Declares `primaryKey`, `keyType` and `incrementing` when a single-column
/// primary key departs from the ORM defaults.
pub struct CustomPrimaryKeyProcessor<'a> {
    schema: &'a Schema,
    registry: &'a TypeRegistry,
}

impl<'a> CustomPrimaryKeyProcessor<'a> {
    pub fn new(schema: &'a Schema, registry: &'a TypeRegistry) -> Self {
        Self { schema, registry }
    }
}

impl Processor for CustomPrimaryKeyProcessor<'_> {
    fn name(&self) -> &'static str {
        "custom_primary_key"
    }

    fn priority(&self) -> i32 {
        6
    }

    fn process(&self, model: &mut Model, _config: &mut Config) -> Result<()> {
        let table = model_table(self.schema, model)?;
        let [key] = table.primary_key.as_slice() else {
            return Ok(());
        };
        let Some(column) = table.column(key) else {
            return Ok(());
        };

        if column.name != DEFAULT_PRIMARY_KEY {
            model.add_property(
                Property::new("primaryKey", Visibility::Protected, Value::str(column.name.as_str()))
                    .with_doc(&["The primary key for the model.", "", "@var string"]),
            );
        }
        if column.native_type != "integer" {
            model.add_property(
                Property::new(
                    "keyType",
                    Visibility::Protected,
                    Value::str(self.registry.resolve(&column.native_type)),
                )
                .with_doc(&["The \"type\" of the auto-incrementing ID.", "", "@var string"]),
            );
        }
        if !column.autoincrement {
            model.add_property(
                Property::new("incrementing", Visibility::Public, Value::Bool(false))
                    .with_doc(&["Indicates if the IDs are auto-incrementing.", "", "@var bool"]),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    fn process(table: Table) -> Model {
        let name = table.name.clone();
        let schema = Schema::new(vec![table]);
        let registry = TypeRegistry::new();
        let mut model = Model::new();
        model.table_name = name;
        CustomPrimaryKeyProcessor::new(&schema, &registry)
            .process(&mut model, &mut Config::defaults())
            .unwrap();
        model
    }

    #[test]
    fn test_conventional_key_adds_nothing() {
        let model = process(Table::new("posts").with_id());
        assert!(model.properties().is_empty());
    }

    #[test]
    fn test_string_key() {
        let model = process(
            Table::new("countries")
                .with_column(Column::new("code", "string").length(2))
                .with_primary_key(&["code"]),
        );
        assert_eq!(
            model.property("primaryKey").unwrap().value,
            Some(Value::str("code"))
        );
        assert_eq!(
            model.property("keyType").unwrap().value,
            Some(Value::str("string"))
        );
        assert_eq!(
            model.property("incrementing").unwrap().value,
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn test_composite_key_is_ignored() {
        let model = process(
            Table::new("post_tag")
                .with_column(Column::new("post_id", "integer"))
                .with_column(Column::new("tag_id", "integer"))
                .with_primary_key(&["post_id", "tag_id"]),
        );
        assert!(model.properties().is_empty());
    }
}
