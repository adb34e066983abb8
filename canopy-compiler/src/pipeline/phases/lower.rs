//! Lower phase - builds the IR from the schema trees.

use eyre::Result;
use tracing::debug;

use crate::{
    CompileError, build_ir,
    pipeline::{CompilationContext, Phase},
};

/// Phase that assembles the IR.
///
/// Assembly errors are returned next to the partial IR, which is kept, so
/// every problem in the input is reported in one run.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Assemble the compressed schema into IR"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<Vec<CompileError>> {
        let (ir, errors) = build_ir(&ctx.modules, ctx.policy, &ctx.options.ir_options());
        debug!(
            directories = ir.directories.len(),
            enums = ir.enums.len(),
            errors = errors.len(),
            "assembled IR"
        );
        ctx.ir = Some(ir);
        Ok(errors)
    }
}
