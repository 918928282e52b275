//! The model pipeline.
//!
//! Each processor contributes one concern to the [`Model`] under construction.
//! [`ModelBuilder`] runs them from the highest priority to the lowest; equal
//! priorities keep their registration order.

mod custom_property;
mod existence;
mod fields;
mod namespace;
mod primary_key;
mod relation;
mod table_name;

pub use custom_property::CustomPropertyProcessor;
pub use existence::ExistenceCheckerProcessor;
pub use fields::{validation_rules, FieldProcessor};
pub use namespace::NamespaceProcessor;
pub use primary_key::CustomPrimaryKeyProcessor;
pub use relation::{method_name, prepare_arguments, RelationProcessor};
pub use table_name::TableNameProcessor;

use std::cmp::Reverse;

use crate::config::Config;
use crate::diagnostic::{GeneratorError, Result};
use crate::ir::Model;
use crate::schema::{Schema, Table};
use crate::types::TypeRegistry;

/// One step of the pipeline.
pub trait Processor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Higher runs first.
    fn priority(&self) -> i32;

    /// Applies this concern to `model`.
    ///
    /// Only the table naming step writes to `config`, recording the resolved
    /// `table_name` for the steps and companions that follow.
    fn process(&self, model: &mut Model, config: &mut Config) -> Result<()>;
}

/// Runs processors over a fresh model.
pub struct ModelBuilder<'a> {
    processors: Vec<Box<dyn Processor + 'a>>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(mut processors: Vec<Box<dyn Processor + 'a>>) -> Self {
        processors.sort_by_key(|p| Reverse(p.priority()));
        Self { processors }
    }

    /// The standard pipeline for generating a model from `schema`.
    pub fn standard(schema: &'a Schema, registry: &'a TypeRegistry) -> Self {
        Self::new(vec![
            Box::new(TableNameProcessor),
            Box::new(ExistenceCheckerProcessor::new(schema)),
            Box::new(NamespaceProcessor),
            Box::new(CustomPrimaryKeyProcessor::new(schema, registry)),
            Box::new(FieldProcessor::new(schema, registry)),
            Box::new(RelationProcessor::new(schema)),
            Box::new(CustomPropertyProcessor),
        ])
    }

    /// Processor names in execution order.
    pub fn order(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Builds a model. The first failing processor aborts the build.
    pub fn build(&self, config: &mut Config) -> Result<Model> {
        let mut model = Model::new();
        for processor in &self.processors {
            tracing::trace!(processor = processor.name(), "running processor");
            processor.process(&mut model, config)?;
        }
        Ok(model)
    }
}

/// Physical table backing `model`.
pub(crate) fn model_table<'s>(schema: &'s Schema, model: &Model) -> Result<&'s Table> {
    let physical = schema.prefixed(&model.table_name);
    schema
        .table(&physical)
        .ok_or(GeneratorError::TableNotFound { table: physical })
}
