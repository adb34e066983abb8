//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;
use crate::CompileError;

/// One step of the compilation pipeline.
///
/// Problems with the input schema are returned as [`CompileError`]s; the
/// [`Pipeline`](super::Pipeline) records them as diagnostics of this phase
/// and moves on. An `Err` means the phase could not run at all and stops
/// the pipeline.
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    /// One line for `canopy explain`.
    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut CompilationContext) -> Result<Vec<CompileError>>;
}
