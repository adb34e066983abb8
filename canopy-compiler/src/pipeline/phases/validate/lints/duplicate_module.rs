//! Lint for modules loaded more than once.

use std::collections::HashSet;

use canopy_schema::ModuleSet;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when two loaded modules share a name.
pub struct DuplicateModuleLint;

impl Lint for DuplicateModuleLint {
    fn name(&self) -> &'static str {
        "duplicate-module"
    }

    fn description(&self) -> &'static str {
        "Detect modules defined more than once"
    }

    fn check(&self, modules: &ModuleSet, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen = HashSet::new();
        for module in modules {
            if !seen.insert(module.name.as_str()) {
                diagnostics.push(
                    Diagnostic::error("validate", format!("duplicate module '{}'", module.name))
                        .with_code(self.name()),
                );
            }
        }
    }
}
