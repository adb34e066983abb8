//! Compile command report data structures.

use std::path::PathBuf;

use canopy_compiler::IrStats;

use super::{
    DiagnosticList,
    output::{Output, Report},
};

/// Where the IR ended up.
#[derive(Debug)]
pub enum Destination {
    File(PathBuf),
    /// Serialized IR, printed when the report renders.
    Stdout(String),
    /// Compilation failed; nothing was written.
    NotWritten,
}

/// Report data from a compile run.
#[derive(Debug)]
pub struct CompileReport {
    pub policy: String,
    pub diagnostics: DiagnosticList,
    pub stats: IrStats,
    pub destination: Destination,
}

impl CompileReport {
    /// Whether the compilation produced no errors.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.errors.is_empty()
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);

        match &self.destination {
            // Stdout carries the IR alone so it can be piped.
            Destination::Stdout(json) => out.preformatted(json),
            Destination::File(path) => out.preformatted(&format!(
                "✓ Wrote {} ({} directories, {} enums, {})",
                path.display(),
                self.stats.directories,
                self.stats.enums,
                self.policy
            )),
            Destination::NotWritten => out.error(&format!(
                "compilation failed with {} error(s); no IR written",
                self.diagnostics.errors.len()
            )),
        }
    }
}
