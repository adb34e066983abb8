//! Check operation - compile without writing anything.

use std::path::PathBuf;

use canopy_compiler::{CompileOptions, pipeline::Pipeline};
use canopy_schema::ModuleSet;
use eyre::{Context, Result};

use crate::reports::{CheckReport, DiagnosticList};

/// Execute the check operation.
///
/// Runs the full pipeline and reports its diagnostics and IR statistics.
pub fn check(modules: ModuleSet, options: CompileOptions, files: &[PathBuf]) -> Result<CheckReport> {
    let module_count = modules.len();
    let mut ctx = Pipeline::new()
        .run(modules, options)
        .wrap_err("Validation failed")?;

    Ok(CheckReport {
        files: files.to_vec(),
        modules: module_count,
        policy: ctx.policy.to_string(),
        diagnostics: DiagnosticList::from_diagnostics(&ctx.diagnostics),
        stats: ctx.stats.take().unwrap_or_default(),
    })
}
