use super::Processor;
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::Model;

/// Places the model in the configured namespace.
pub struct NamespaceProcessor;

impl Processor for NamespaceProcessor {
    fn name(&self) -> &'static str {
        "namespace"
    }

    fn priority(&self) -> i32 {
        6
    }

    fn process(&self, model: &mut Model, config: &mut Config) -> Result<()> {
        model.namespace = config
            .require_str("namespace")?
            .trim_matches('\\')
            .to_string();
        Ok(())
    }
}
