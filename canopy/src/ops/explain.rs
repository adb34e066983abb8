//! Explain operation - what the pipeline does with the current flags.

use canopy_compiler::{
    CompileOptions, CompressionPolicy,
    pipeline::{Pipeline, phases::ValidatePhase},
};

use crate::reports::ExplainReport;

/// Execute the explain operation.
///
/// Describes the phases, lints and policies without reading any schema.
pub fn explain(options: &CompileOptions) -> ExplainReport {
    ExplainReport {
        phases: Pipeline::new().phase_info(),
        lints: ValidatePhase::new().lint_info(),
        policies: CompressionPolicy::ALL.to_vec(),
        selected: options.policy().map_err(|e| e.to_string()),
    }
}
