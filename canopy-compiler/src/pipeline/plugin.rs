//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;
use crate::CompileError;

/// Read-only observer of a pipeline run.
///
/// `on_after_phase` also receives the compile errors the phase reported,
/// already recorded in the context's diagnostics. [`SnapshotPlugin`]
/// records the context after every phase.
///
/// [`SnapshotPlugin`]: super::SnapshotPlugin
///
/// # Example
///
/// ```ignore
/// struct FailFast;
///
/// impl Plugin for FailFast {
///     fn name(&self) -> &'static str { "fail-fast" }
///
///     fn on_after_phase(
///         &self,
///         phase: &str,
///         errors: &[CompileError],
///         _ctx: &CompilationContext,
///     ) -> Result<()> {
///         match errors.iter().find(|e| e.is_fatal()) {
///             Some(err) => eyre::bail!("{phase}: {err}"),
///             None => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returning an error aborts the pipeline before `phase` runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Returning an error aborts the pipeline after `phase` ran.
    #[allow(unused_variables)]
    fn on_after_phase(
        &self,
        phase: &str,
        errors: &[CompileError],
        ctx: &CompilationContext,
    ) -> Result<()> {
        Ok(())
    }
}
