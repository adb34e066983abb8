//! Project configuration read from `canopy.toml`.
//!
//! ```toml
//! [input]
//! files = ["schema/openconfig-interfaces.json"]
//!
//! [compile]
//! compress_paths = true
//! fake_root = true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use canopy_compiler::CompileOptions;
use eyre::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "canopy.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanopyToml {
    pub input: InputConfig,
    pub compile: CompileOptions,
    /// Directory the file was read from; input paths are relative to it.
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub files: Vec<PathBuf>,
}

impl CanopyToml {
    /// Read and parse a config file that must exist.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let mut config: CanopyToml = toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Like [`CanopyToml::open`], but a missing file is not an error.
    pub fn open_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::open(path).map(Some)
    }

    /// `[input] files`, resolved against the config file's directory.
    pub fn input_files(&self) -> Vec<PathBuf> {
        self.input
            .files
            .iter()
            .map(|file| self.base_dir.join(file))
            .collect()
    }
}
