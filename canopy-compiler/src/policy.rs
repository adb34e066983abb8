//! Compression policies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CompileError;

/// Container holding intended configuration leaves.
pub const CONFIG_CONTAINER: &str = "config";
/// Container holding operational state leaves.
pub const STATE_CONTAINER: &str = "state";

/// How parallel config/state subtrees and read-only data are treated when
/// computing the fields of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionPolicy {
    /// Map the schema tree as-is.
    Uncompressed,
    /// Map the schema tree as-is, dropping read-only nodes.
    UncompressedExcludeDerivedState,
    /// Compress, resolving config/state duplicates to the config leaf.
    PreferIntendedConfig,
    /// Compress, resolving config/state duplicates to the state leaf.
    PreferOperationalState,
    /// Compress and drop read-only nodes.
    ExcludeDerivedState,
}

impl CompressionPolicy {
    pub const ALL: [CompressionPolicy; 5] = [
        CompressionPolicy::Uncompressed,
        CompressionPolicy::UncompressedExcludeDerivedState,
        CompressionPolicy::PreferIntendedConfig,
        CompressionPolicy::PreferOperationalState,
        CompressionPolicy::ExcludeDerivedState,
    ];

    /// Derive the policy from the three user-facing flags.
    ///
    /// `prefer_operational_state` requires compression and is incompatible
    /// with excluding state.
    pub fn from_flags(
        compress_paths: bool,
        exclude_state: bool,
        prefer_operational_state: bool,
    ) -> Result<Self, CompileError> {
        match (compress_paths, exclude_state, prefer_operational_state) {
            (false, _, true) => Err(CompileError::InvalidPolicyCombination {
                reason: "prefer_operational_state requires compress_paths",
            }),
            (true, true, true) => Err(CompileError::InvalidPolicyCombination {
                reason: "prefer_operational_state cannot be combined with exclude_state",
            }),
            (false, false, false) => Ok(CompressionPolicy::Uncompressed),
            (false, true, false) => Ok(CompressionPolicy::UncompressedExcludeDerivedState),
            (true, false, false) => Ok(CompressionPolicy::PreferIntendedConfig),
            (true, false, true) => Ok(CompressionPolicy::PreferOperationalState),
            (true, true, false) => Ok(CompressionPolicy::ExcludeDerivedState),
        }
    }

    /// Returns true if config/state and surrounding containers are compressed.
    pub fn compress_enabled(&self) -> bool {
        matches!(
            self,
            CompressionPolicy::PreferIntendedConfig
                | CompressionPolicy::PreferOperationalState
                | CompressionPolicy::ExcludeDerivedState
        )
    }

    /// Returns true if read-only nodes are dropped.
    pub fn state_excluded(&self) -> bool {
        matches!(
            self,
            CompressionPolicy::UncompressedExcludeDerivedState
                | CompressionPolicy::ExcludeDerivedState
        )
    }

    /// Container whose leaves win when both config and state define one.
    pub fn prioritized_container(&self) -> &'static str {
        match self {
            CompressionPolicy::PreferOperationalState => STATE_CONTAINER,
            _ => CONFIG_CONTAINER,
        }
    }

    /// Container whose duplicate leaves are shadowed.
    pub fn deprioritized_container(&self) -> &'static str {
        match self {
            CompressionPolicy::PreferOperationalState => CONFIG_CONTAINER,
            _ => STATE_CONTAINER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionPolicy::Uncompressed => "uncompressed",
            CompressionPolicy::UncompressedExcludeDerivedState => {
                "uncompressed-exclude-derived-state"
            }
            CompressionPolicy::PreferIntendedConfig => "prefer-intended-config",
            CompressionPolicy::PreferOperationalState => "prefer-operational-state",
            CompressionPolicy::ExcludeDerivedState => "exclude-derived-state",
        }
    }
}

impl std::fmt::Display for CompressionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compression policy '{0}'")]
pub struct ParsePolicyError(pub String);

impl FromStr for CompressionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompressionPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}
