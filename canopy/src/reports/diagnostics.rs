//! Pipeline diagnostics grouped by severity.

use canopy_compiler::pipeline::{Diagnostic, Severity};

use super::output::{Output, Report};

/// Diagnostic messages, one string per diagnostic with its location
/// appended on a second line.
#[derive(Debug, Default)]
pub struct DiagnosticList {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl DiagnosticList {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut list = Self::default();
        for diag in diagnostics {
            let msg = match &diag.location {
                Some(loc) => format!("{}\n  --> {}", diag.message, loc),
                None => diag.message.clone(),
            };
            match diag.severity {
                Severity::Error => list.errors.push(msg),
                Severity::Warning => list.warnings.push(msg),
                Severity::Info => list.infos.push(msg),
            }
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.infos.is_empty()
    }
}

impl Report for DiagnosticList {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }
    }
}
