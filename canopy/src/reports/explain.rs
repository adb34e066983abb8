//! Explain command report data structures.

use canopy_compiler::{
    CompressionPolicy, STATE_CONTAINER,
    pipeline::{PhaseInfo, phases::LintInfo},
};

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Pipeline phases in execution order.
    pub phases: Vec<PhaseInfo>,
    /// Lints run by the validate phase.
    pub lints: Vec<LintInfo>,
    pub policies: Vec<CompressionPolicy>,
    /// Policy chosen by the current flags, or why they were rejected.
    pub selected: Result<CompressionPolicy, String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Pipeline phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Compression policies");
        for policy in &self.policies {
            out.list_item(&format!("{} ({})", policy, policy_flags(*policy)));
        }
        out.newline();

        match &self.selected {
            Ok(policy) => out.key_value("Selected policy", policy.as_str()),
            Err(reason) => out.error(reason),
        }
    }
}

/// The CLI flags that select `policy`.
fn policy_flags(policy: CompressionPolicy) -> String {
    let mut flags = Vec::new();
    if policy.compress_enabled() {
        flags.push("--compress-paths");
    }
    if policy.state_excluded() {
        flags.push("--exclude-state");
    }
    if policy.prioritized_container() == STATE_CONTAINER {
        flags.push("--prefer-operational-state");
    }
    if flags.is_empty() {
        "no flags".to_string()
    } else {
        flags.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_policy_flags() {
        assert_eq!(policy_flags(CompressionPolicy::Uncompressed), "no flags");
        assert_eq!(
            policy_flags(CompressionPolicy::PreferOperationalState),
            "--compress-paths --prefer-operational-state"
        );
        assert_eq!(
            policy_flags(CompressionPolicy::UncompressedExcludeDerivedState),
            "--exclude-state"
        );
    }

    #[test]
    fn test_render() {
        let report = ExplainReport {
            phases: vec![PhaseInfo {
                name: "lower",
                description: "Assemble the compressed schema into IR",
            }],
            lints: Vec::new(),
            policies: vec![CompressionPolicy::ExcludeDerivedState],
            selected: Ok(CompressionPolicy::ExcludeDerivedState),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(out.stdout.contains(&"  1. lower - Assemble the compressed schema into IR".to_string()));
        assert!(out.stdout.contains(
            &"  - exclude-derived-state (--compress-paths --exclude-state)".to_string()
        ));
        assert_eq!(
            out.stdout.last().map(String::as_str),
            Some("Selected policy: exclude-derived-state")
        );
        assert!(out.stderr.is_empty());
    }
}
