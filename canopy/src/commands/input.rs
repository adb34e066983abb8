use std::path::{Path, PathBuf};

use canopy_compiler::CompileOptions;
use clap::Args;
use eyre::{Result, bail};
use tracing::debug;

use crate::config::{CanopyToml, DEFAULT_CONFIG};

/// Compile flags, layered over `canopy.toml`.
///
/// A flag can switch an option on but never off.
#[derive(Args, Debug, Default)]
pub struct CompileFlags {
    /// Path to canopy.toml (defaults to ./canopy.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Merge config/state containers into their parents
    #[arg(long)]
    pub compress_paths: bool,

    /// Leave read-only state out of the IR
    #[arg(long)]
    pub exclude_state: bool,

    /// Map fields to state leaves instead of config leaves
    #[arg(long)]
    pub prefer_operational_state: bool,

    /// Generate a synthetic root directory
    #[arg(long)]
    pub fake_root: bool,

    /// Name of the synthetic root (implies --fake-root)
    #[arg(long, value_name = "NAME")]
    pub fake_root_name: Option<String>,

    /// Give every leaf its own enumeration instead of sharing typedefs
    #[arg(long)]
    pub skip_enum_dedup: bool,

    /// Omit shadow paths from fields
    #[arg(long)]
    pub ignore_shadow_paths: bool,

    /// Module to leave out of the IR (repeatable)
    #[arg(long = "exclude-module", value_name = "MODULE")]
    pub exclude_modules: Vec<String>,
}

impl CompileFlags {
    fn load_config(&self) -> Result<CanopyToml> {
        match &self.config {
            Some(path) => CanopyToml::open(path),
            None => Ok(CanopyToml::open_if_exists(Path::new(DEFAULT_CONFIG))?.unwrap_or_default()),
        }
    }

    /// Compile options from the config file with the flags applied.
    pub fn options(&self) -> Result<CompileOptions> {
        let config = self.load_config()?;
        Ok(self.apply(config.compile))
    }

    fn apply(&self, mut options: CompileOptions) -> CompileOptions {
        options.compress_paths |= self.compress_paths;
        options.exclude_state |= self.exclude_state;
        options.prefer_operational_state |= self.prefer_operational_state;
        options.fake_root |= self.fake_root;
        if let Some(name) = &self.fake_root_name {
            options.fake_root = true;
            options.fake_root_name = Some(name.clone());
        }
        options.skip_enum_dedup |= self.skip_enum_dedup;
        options.ignore_shadow_paths |= self.ignore_shadow_paths;
        options
            .exclude_modules
            .extend(self.exclude_modules.iter().cloned());
        options
    }
}

/// Schema inputs and compile flags shared by `compile` and `check`.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Schema files (.json or .toml); defaults to [input] files in canopy.toml
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub flags: CompileFlags,
}

impl InputArgs {
    /// Schema files and compile options after merging the config file.
    pub fn resolve(&self) -> Result<(Vec<PathBuf>, CompileOptions)> {
        let config = self.flags.load_config()?;

        let files = if self.files.is_empty() {
            config.input_files()
        } else {
            self.files.clone()
        };
        if files.is_empty() {
            bail!(
                "No schema files given; pass them as arguments or list them under [input] files in {}",
                DEFAULT_CONFIG
            );
        }

        let options = self.flags.apply(config.compile);
        debug!(files = files.len(), ?options, "resolved inputs");
        Ok((files, options))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use canopy_compiler::CompressionPolicy;

    use super::*;

    fn config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("canopy.toml");
        fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn test_flags_layer_over_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_file(
            dir.path(),
            "[input]\nfiles = [\"a.json\"]\n\n[compile]\ncompress_paths = true\nexclude_modules = [\"x\"]\n",
        );

        let args = InputArgs {
            files: Vec::new(),
            flags: CompileFlags {
                config: Some(config),
                prefer_operational_state: true,
                fake_root_name: Some("Root".into()),
                exclude_modules: vec!["y".into()],
                ..CompileFlags::default()
            },
        };
        let (files, options) = args.resolve().expect("resolves");

        assert_eq!(files, vec![dir.path().join("a.json")]);
        assert_eq!(
            options.policy(),
            Ok(CompressionPolicy::PreferOperationalState)
        );
        assert_eq!(options.ir_options().fake_root.as_deref(), Some("Root"));
        assert_eq!(options.exclude_modules, vec!["x", "y"]);
    }

    #[test]
    fn test_files_override_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_file(dir.path(), "[input]\nfiles = [\"a.json\"]\n");

        let args = InputArgs {
            files: vec![PathBuf::from("b.json")],
            flags: CompileFlags {
                config: Some(config),
                ..CompileFlags::default()
            },
        };
        let (files, _) = args.resolve().expect("resolves");
        assert_eq!(files, vec![PathBuf::from("b.json")]);
    }

    #[test]
    fn test_no_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_file(dir.path(), "");

        let args = InputArgs {
            files: Vec::new(),
            flags: CompileFlags {
                config: Some(config),
                ..CompileFlags::default()
            },
        };
        let err = args.resolve().expect_err("no inputs");
        assert!(err.to_string().contains("No schema files"));
    }

    #[test]
    fn test_options_without_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_file(dir.path(), "[compile]\nexclude_state = true\n");

        let flags = CompileFlags {
            config: Some(config),
            compress_paths: true,
            ..CompileFlags::default()
        };
        let options = flags.options().expect("options");
        assert_eq!(options.policy(), Ok(CompressionPolicy::ExcludeDerivedState));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let flags = CompileFlags {
            config: Some(dir.path().join("missing.toml")),
            ..CompileFlags::default()
        };
        assert!(flags.options().is_err());
    }
}
