//! Compile operation - schema trees to JSON IR.

use std::{fs, path::Path};

use canopy_compiler::{
    CompileOptions,
    pipeline::{Pipeline, SnapshotPlugin},
};
use canopy_schema::ModuleSet;
use eyre::{Context, Result, eyre};
use tracing::debug;

use crate::reports::{CompileReport, Destination, DiagnosticList};

/// Where the compile operation sends its output.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompileTarget<'a> {
    /// IR file; the IR goes to stdout when unset.
    pub output: Option<&'a Path>,
    /// Directory receiving one JSON snapshot per pipeline phase.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the compile operation.
///
/// Nothing is written when the pipeline reports an error; the report then
/// carries the diagnostics only.
pub fn compile(
    modules: ModuleSet,
    options: CompileOptions,
    target: CompileTarget,
) -> Result<CompileReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = target.snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let mut ctx = pipeline.run(modules, options).wrap_err("Compilation failed")?;

    let mut report = CompileReport {
        policy: ctx.policy.to_string(),
        diagnostics: DiagnosticList::from_diagnostics(&ctx.diagnostics),
        stats: ctx.stats.take().unwrap_or_default(),
        destination: Destination::NotWritten,
    };
    if !report.is_ok() {
        debug!(errors = report.diagnostics.errors.len(), "skipping output");
        return Ok(report);
    }

    let ir = ctx
        .take_ir()
        .ok_or_else(|| eyre!("Pipeline finished without an IR"))?;
    let json = serde_json::to_string_pretty(&ir).wrap_err("Failed to serialize IR")?;

    report.destination = match target.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            debug!(path = %path.display(), "wrote IR");
            Destination::File(path.to_path_buf())
        }
        None => Destination::Stdout(json),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use canopy_schema::{Module, SchemaNode, TypeDescriptor};

    use super::*;

    fn interfaces() -> ModuleSet {
        ModuleSet::new([Module::new(
            "openconfig-interfaces",
            [SchemaNode::container("interfaces").with_child(
                SchemaNode::list("interface", ["name"]).with_children([
                    SchemaNode::leaf("name", TypeDescriptor::String),
                    SchemaNode::leaf("mtu", TypeDescriptor::Uint16),
                ]),
            )],
        )])
    }

    #[test]
    fn test_compile_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("ir.json");
        let options = CompileOptions {
            compress_paths: true,
            ..CompileOptions::default()
        };

        let report = compile(
            interfaces(),
            options,
            CompileTarget {
                output: Some(&output),
                snapshot_dir: None,
            },
        )
        .expect("compiles");

        assert!(report.is_ok());
        assert!(matches!(&report.destination, Destination::File(path) if path == &output));

        let content = fs::read_to_string(&output).expect("IR written");
        let ir: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
        assert_eq!(ir["meta"]["policy"], "prefer-intended-config");
        assert!(ir["directories"]["/interfaces/interface"].is_object());
    }

    #[test]
    fn test_compile_to_stdout() {
        let report =
            compile(interfaces(), CompileOptions::default(), CompileTarget::default()).expect("compiles");

        let Destination::Stdout(json) = &report.destination else {
            panic!("expected stdout destination");
        };
        assert!(json.contains("\"/interfaces\""));
    }

    #[test]
    fn test_errors_write_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("ir.json");
        let modules = ModuleSet::new([Module::new(
            "m",
            [SchemaNode::list("server", ["address"])
                .with_child(SchemaNode::leaf("port", TypeDescriptor::Uint16))],
        )]);

        let report = compile(
            modules,
            CompileOptions::default(),
            CompileTarget {
                output: Some(&output),
                snapshot_dir: None,
            },
        )
        .expect("runs");

        assert!(!report.is_ok());
        assert!(matches!(report.destination, Destination::NotWritten));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_policy() {
        let options = CompileOptions {
            exclude_state: true,
            prefer_operational_state: true,
            ..CompileOptions::default()
        };
        let err = compile(interfaces(), options, CompileTarget::default())
            .expect_err("invalid flags");
        assert!(err.root_cause().to_string().contains("requires"));
    }

    #[test]
    fn test_snapshot_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshots = dir.path().join("debug");

        compile(
            interfaces(),
            CompileOptions::default(),
            CompileTarget {
                output: None,
                snapshot_dir: Some(&snapshots),
            },
        )
        .expect("compiles");

        assert!(snapshots.join("lower.json").exists());
        assert!(snapshots.join("analyze.json").exists());
    }
}
