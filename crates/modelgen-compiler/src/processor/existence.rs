use super::Processor;
use crate::config::Config;
use crate::diagnostic::{GeneratorError, Result};
use crate::ir::Model;
use crate::schema::Schema;

/// Fails fast when the model's table is absent from the schema.
pub struct ExistenceCheckerProcessor<'a> {
    schema: &'a Schema,
}

impl<'a> ExistenceCheckerProcessor<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }
}

impl Processor for ExistenceCheckerProcessor<'_> {
    fn name(&self) -> &'static str {
        "existence_checker"
    }

    // Runs right after the table name is known.
    fn priority(&self) -> i32 {
        8
    }

    fn process(&self, model: &mut Model, _config: &mut Config) -> Result<()> {
        let physical = self.schema.prefixed(&model.table_name);
        if !self.schema.has_table(&physical) {
            return Err(GeneratorError::TableNotFound { table: physical });
        }
        Ok(())
    }
}
