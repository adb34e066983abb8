//! Validate phase - runs lints on the schema trees.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{ConfigUnderStateLint, DuplicateModuleLint, KeylessConfigListLint};

use crate::{
    CompileError,
    pipeline::{CompilationContext, Phase},
};

/// Phase that validates the schema trees using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateModuleLint),
                Box::new(KeylessConfigListLint),
                Box::new(ConfigUnderStateLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check schema integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<Vec<CompileError>> {
        for lint in &self.lints {
            lint.check(&ctx.modules, &mut ctx.diagnostics);
        }

        // Warnings are allowed
        if ctx.has_errors() {
            let errors: Vec<String> = ctx.errors().map(|d| d.to_string()).collect();
            bail!(
                "Validation failed with {} error(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            );
        }

        // Lints report diagnostics directly
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use canopy_schema::{Module, ModuleSet, SchemaNode, TypeDescriptor};

    use super::*;
    use crate::{CompileOptions, pipeline::Diagnostic};

    fn context(modules: ModuleSet) -> CompilationContext {
        CompilationContext::new(modules, CompileOptions::default()).expect("valid options")
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _modules: &ModuleSet, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = context(ModuleSet::default());
        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);

        let err = phase.run(&mut ctx).expect_err("lint error fails the phase");
        assert!(err.to_string().contains("error: forced error"));
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_allowed() {
        let modules = ModuleSet::new([Module::new(
            "m",
            [SchemaNode::list("entry", Vec::<String>::new())
                .with_child(SchemaNode::leaf("id", TypeDescriptor::Uint32))],
        )]);
        let mut ctx = context(modules);

        let phase = ValidatePhase::empty().with_lint(KeylessConfigListLint);
        assert!(phase.run(&mut ctx).is_ok());
        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec!["duplicate-module", "keyless-config-list", "config-under-state"]
        );
    }
}
