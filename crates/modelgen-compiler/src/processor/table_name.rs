use super::Processor;
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::{Model, Property, Value, Visibility};
use crate::naming::{default_table_name, short_class_name};

/// Resolves the class name, parent class and table name.
pub struct TableNameProcessor;

impl Processor for TableNameProcessor {
    fn name(&self) -> &'static str {
        "table_name"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn process(&self, model: &mut Model, config: &mut Config) -> Result<()> {
        let class_name = config.require_str("class_name")?.to_string();
        let base_class_name = config.require_str("base_class_name")?.to_string();

        model.class_name = class_name.clone();
        model.base_class_name = short_class_name(&base_class_name).to_string();
        model.add_use(base_class_name.as_str());

        let default_table = default_table_name(&class_name);
        let table_name = config
            .get_str("table_name")
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_table.clone());

        if table_name != default_table {
            model.add_property(
                Property::new("table", Visibility::Protected, Value::str(table_name.as_str()))
                    .with_doc(&["The table associated with the model.", "", "@var string"]),
            );
        }

        model.table_name = table_name.clone();
        config.set("table_name", table_name);
        Ok(())
    }
}
