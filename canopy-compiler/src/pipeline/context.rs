//! Compilation context passed through pipeline phases.

use canopy_ir::Ir;
use canopy_schema::ModuleSet;

use super::diagnostic::{Diagnostic, Severity};
use crate::{CompileError, CompileOptions, CompressionPolicy, IrStats};

/// State of a compilation, accumulated phase by phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// The pipeline's own copy of the schema trees; the transform phase
    /// rewrites it in place.
    pub modules: ModuleSet,
    pub options: CompileOptions,
    /// Policy derived from `options` before any phase runs.
    pub policy: CompressionPolicy,
    /// The IR (populated by LowerPhase).
    pub ir: Option<Ir>,
    /// Statistics (populated by AnalyzePhase).
    pub stats: Option<IrStats>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a context, rejecting invalid policy flag combinations.
    pub fn new(modules: ModuleSet, options: CompileOptions) -> Result<Self, CompileError> {
        let policy = options.policy()?;
        Ok(Self {
            modules,
            options,
            policy,
            ir: None,
            stats: None,
            diagnostics: Vec::new(),
        })
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record compile errors produced by `phase`.
    pub fn add_compile_errors<'e>(
        &mut self,
        phase: &str,
        errors: impl IntoIterator<Item = &'e CompileError>,
    ) {
        self.diagnostics
            .extend(errors.into_iter().map(|e| Diagnostic::from_error(phase, e)));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the IR out of the context, if LowerPhase produced one.
    pub fn take_ir(&mut self) -> Option<Ir> {
        self.ir.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CompilationContext {
        CompilationContext::new(ModuleSet::default(), CompileOptions::default())
            .expect("default options are valid")
    }

    #[test]
    fn test_context_creation() {
        let ctx = context();
        assert_eq!(ctx.policy, CompressionPolicy::Uncompressed);
        assert!(ctx.ir.is_none());
        assert!(ctx.stats.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let options = CompileOptions {
            prefer_operational_state: true,
            ..CompileOptions::default()
        };
        let result = CompilationContext::new(ModuleSet::default(), options);
        assert!(matches!(
            result,
            Err(CompileError::InvalidPolicyCombination { .. })
        ));
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = context();
        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");
        ctx.add_info("test", "just info");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_add_compile_errors() {
        let mut ctx = context();
        let errors = [CompileError::UnresolvableCrossReference {
            path: "/a".into(),
            reference: "../b".into(),
        }];
        ctx.add_compile_errors("lower", &errors);

        assert!(!ctx.has_errors());
        assert_eq!(ctx.warnings().count(), 1);
    }
}
