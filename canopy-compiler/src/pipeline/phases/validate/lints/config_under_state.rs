//! Lint for `config true` statements under read-only nodes.

use canopy_schema::{ConfigFlag, ModuleSet};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when a node explicitly claims `config true` below a
/// read-only ancestor. The claim has no effect.
pub struct ConfigUnderStateLint;

impl Lint for ConfigUnderStateLint {
    fn name(&self) -> &'static str {
        "config-under-state"
    }

    fn description(&self) -> &'static str {
        "Warn on config statements ignored under read-only nodes"
    }

    fn check(&self, modules: &ModuleSet, diagnostics: &mut Vec<Diagnostic>) {
        for module in modules {
            for node in module.root().descendants() {
                if node.config == ConfigFlag::True && !node.is_config() {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("'{}' is marked config under a read-only node", node.name),
                        )
                        .at(node.schema_path())
                        .with_code(self.name()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use canopy_schema::{Module, SchemaNode, TypeDescriptor};

    use super::*;

    #[test]
    fn test_config_under_state_warns() {
        let modules = ModuleSet::new([Module::new(
            "m",
            [SchemaNode::container("state").with_config(false).with_child(
                SchemaNode::leaf("name", TypeDescriptor::String).with_config(true),
            )],
        )]);
        let mut diagnostics = Vec::new();
        ConfigUnderStateLint.check(&modules, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("/state/name"));
    }

    #[test]
    fn test_explicit_config_under_config_ok() {
        let modules = ModuleSet::new([Module::new(
            "m",
            [SchemaNode::container("config").with_child(
                SchemaNode::leaf("name", TypeDescriptor::String).with_config(true),
            )],
        )]);
        let mut diagnostics = Vec::new();
        ConfigUnderStateLint.check(&modules, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
