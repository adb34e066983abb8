//! Lint for writable lists without keys.

use canopy_schema::ModuleSet;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns on config lists declaring no key.
///
/// Entries of such a list cannot be addressed individually, so generated
/// code falls back to ordered collections.
pub struct KeylessConfigListLint;

impl Lint for KeylessConfigListLint {
    fn name(&self) -> &'static str {
        "keyless-config-list"
    }

    fn description(&self) -> &'static str {
        "Warn on config lists without keys"
    }

    fn check(&self, modules: &ModuleSet, diagnostics: &mut Vec<Diagnostic>) {
        for module in modules {
            for node in module.root().descendants() {
                if node.is_list() && node.is_config() && node.keys.is_empty() {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("config list '{}' has no keys", node.name),
                        )
                        .at(node.schema_path())
                        .with_code(self.name()),
                    );
                }
            }
        }
    }
}
