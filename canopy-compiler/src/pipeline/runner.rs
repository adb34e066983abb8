//! Pipeline orchestrator.

use canopy_schema::ModuleSet;
use eyre::Result;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{AnalyzePhase, LowerPhase, TransformPhase, ValidatePhase},
};
use crate::CompileOptions;

/// Name and description of a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, transform, lower, analyze) followed
/// by any user phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".canopy/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(modules, options)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline over `modules`.
    ///
    /// The policy is derived from `options` before any phase runs. Lint
    /// errors stop the pipeline after validation; assembly errors are kept
    /// as diagnostics next to the partial IR, so callers should check
    /// [`CompilationContext::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid flag combination or if any phase
    /// fails fatally.
    pub fn run(&self, modules: ModuleSet, options: CompileOptions) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(modules, options)?;
        debug!(policy = %ctx.policy, modules = ctx.modules.len(), "starting pipeline");

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Name and description of every phase, in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| PhaseInfo {
                name: phase.name(),
                description: phase.description(),
            })
            .collect()
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(phase = phase_name, "running phase");
        let errors = phase.run(ctx)?;
        if !errors.is_empty() {
            debug!(phase = phase_name, errors = errors.len(), "phase reported errors");
        }
        ctx.add_compile_errors(phase_name, &errors);

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, &errors, ctx)?;
        }

        Ok(())
    }
}

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ValidatePhase::new()),
        Box::new(TransformPhase),
        Box::new(LowerPhase),
        Box::new(AnalyzePhase),
    ]
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
