use super::Processor;
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::{Model, Property, Value, Visibility};

/// Applies `no_timestamps`, `date_format` and `connection` from the config.
pub struct CustomPropertyProcessor;

impl Processor for CustomPropertyProcessor {
    fn name(&self) -> &'static str {
        "custom_property"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn process(&self, model: &mut Model, config: &mut Config) -> Result<()> {
        if config.get_bool("no_timestamps") == Some(true) {
            model.add_property(
                Property::new("timestamps", Visibility::Public, Value::Bool(false)).with_doc(&[
                    "Indicates if the model should be timestamped.",
                    "",
                    "@var bool",
                ]),
            );
        }

        if let Some(format) = config.get_str("date_format") {
            model.add_property(
                Property::new("dateFormat", Visibility::Protected, Value::str(format)).with_doc(&[
                    "The storage format of the model's date columns.",
                    "",
                    "@var string",
                ]),
            );
        }

        if let Some(connection) = config.get_str("connection") {
            model.add_property(
                Property::new("connection", Visibility::Protected, Value::str(connection))
                    .with_doc(&["The connection name for the model.", "", "@var string"]),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nothing_added_by_default() {
        let mut model = Model::new();
        CustomPropertyProcessor
            .process(&mut model, &mut Config::defaults())
            .unwrap();
        assert!(model.properties().is_empty());
    }

    #[test]
    fn test_custom_properties() {
        let mut config = Config::new(
            [
                ("no-timestamps", json!(true)),
                ("date-format", json!("U")),
                ("connection", json!("reporting")),
            ],
            None,
        );
        let mut model = Model::new();
        CustomPropertyProcessor.process(&mut model, &mut config).unwrap();

        assert_eq!(
            model.property("timestamps").unwrap().value,
            Some(Value::Bool(false))
        );
        assert_eq!(model.property("dateFormat").unwrap().value, Some(Value::str("U")));
        let connection = model.property("connection").unwrap();
        assert_eq!(connection.visibility, Visibility::Protected);
        assert_eq!(connection.value, Some(Value::str("reporting")));
    }
}
