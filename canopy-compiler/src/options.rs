//! User-facing compile options.

use serde::{Deserialize, Serialize};

use crate::{CompileError, CompressionPolicy, DEFAULT_FAKE_ROOT, IrOptions};

/// Every knob of a compilation, as read from flags or a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub compress_paths: bool,
    pub exclude_state: bool,
    pub prefer_operational_state: bool,
    /// Generate a synthetic root directory.
    pub fake_root: bool,
    /// Name of the synthetic root; defaults to `Device`.
    pub fake_root_name: Option<String>,
    pub skip_enum_dedup: bool,
    pub ignore_shadow_paths: bool,
    pub exclude_modules: Vec<String>,
}

impl CompileOptions {
    /// Derive the compression policy from the three policy flags.
    pub fn policy(&self) -> Result<CompressionPolicy, CompileError> {
        CompressionPolicy::from_flags(
            self.compress_paths,
            self.exclude_state,
            self.prefer_operational_state,
        )
    }

    pub fn ir_options(&self) -> IrOptions {
        IrOptions {
            fake_root: self.fake_root.then(|| {
                self.fake_root_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FAKE_ROOT.to_string())
            }),
            skip_enum_dedup: self.skip_enum_dedup,
            ignore_shadow_paths: self.ignore_shadow_paths,
            exclude_modules: self.exclude_modules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_uncompressed() {
        let options = CompileOptions::default();
        assert_eq!(options.policy(), Ok(CompressionPolicy::Uncompressed));
        assert_eq!(options.ir_options(), IrOptions::default());
    }

    #[test]
    fn test_fake_root_name() {
        let mut options = CompileOptions {
            fake_root: true,
            ..CompileOptions::default()
        };
        assert_eq!(options.ir_options().fake_root.as_deref(), Some("Device"));

        options.fake_root_name = Some("Root".into());
        assert_eq!(options.ir_options().fake_root.as_deref(), Some("Root"));

        options.fake_root = false;
        assert_eq!(options.ir_options().fake_root, None);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let options: CompileOptions = toml::from_str(
            r#"
            compress_paths = true
            exclude_state = true
            exclude_modules = ["ietf-interfaces"]
            "#,
        )
        .expect("valid options");
        assert_eq!(options.policy(), Ok(CompressionPolicy::ExcludeDerivedState));
        assert_eq!(options.exclude_modules, vec!["ietf-interfaces"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<CompileOptions, _> = toml::from_str("compress = true");
        assert!(result.is_err());
    }
}
