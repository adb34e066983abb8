//! Analyze phase - computes statistics from the IR.

use eyre::Result;

use crate::{
    CompileError, IrStats,
    pipeline::{CompilationContext, Phase},
};

/// Phase that computes [`IrStats`]. Must run after `LowerPhase`.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Compute statistics from IR"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<Vec<CompileError>> {
        let ir = ctx
            .ir
            .as_ref()
            .ok_or_else(|| eyre::eyre!("IR not set - AnalyzePhase must run after LowerPhase"))?;

        ctx.stats = Some(IrStats::from_ir(ir));
        Ok(Vec::new())
    }
}
