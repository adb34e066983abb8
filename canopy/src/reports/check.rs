//! Check command report data structures.

use std::path::PathBuf;

use canopy_compiler::IrStats;

use super::{
    DiagnosticList,
    output::{Output, Report},
};

/// Report data from a check run.
#[derive(Debug)]
pub struct CheckReport {
    /// Schema files that were loaded.
    pub files: Vec<PathBuf>,
    /// Number of modules across those files.
    pub modules: usize,
    /// Compression policy in effect.
    pub policy: String,
    pub diagnostics: DiagnosticList,
    pub stats: IrStats,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.diagnostics.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!(
            "✓ {} module{} from {} file{} compile under {}",
            self.modules,
            plural(self.modules),
            self.files.len(),
            plural(self.files.len()),
            self.policy
        ));
        out.newline();

        out.section("Statistics");
        let stats = &self.stats;
        out.key_value_indented("directories", &stats.directories.to_string());
        out.key_value_indented("lists", &stats.lists.to_string());
        out.key_value_indented("fields", &stats.fields.to_string());
        out.key_value_indented("keys", &stats.keys.to_string());
        out.key_value_indented("shadowed fields", &stats.shadowed_fields.to_string());
        out.key_value_indented("enums", &stats.enums.to_string());
        if stats.has_fake_root {
            out.key_value_indented("fake root", "yes");
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
