//! Errors produced while compiling a schema tree.

use thiserror::Error;

/// A structured compile error.
///
/// Extraction and assembly accumulate these instead of failing fast, so a
/// single run reports every problem it can find.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum CompileError {
    #[error("invalid compression flags: {reason}")]
    InvalidPolicyCombination { reason: &'static str },

    #[error("duplicate field '{name}' in '{parent}'")]
    DuplicateField { parent: String, name: String },

    #[error("cannot resolve cross-reference '{reference}' of '{path}'")]
    UnresolvableCrossReference { path: String, reference: String },

    #[error("list '{path}' declares key '{key}' but has no such leaf")]
    MissingListKey { path: String, key: String },
}

impl CompileError {
    /// Schema path the error refers to, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            CompileError::InvalidPolicyCombination { .. } => None,
            CompileError::DuplicateField { parent, .. } => Some(parent),
            CompileError::UnresolvableCrossReference { path, .. } => Some(path),
            CompileError::MissingListKey { path, .. } => Some(path),
        }
    }

    /// Fatal errors fail the compilation; the rest are reported as warnings.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CompileError::UnresolvableCrossReference { .. })
    }

    /// Stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::InvalidPolicyCombination { .. } => "invalid-policy-combination",
            CompileError::DuplicateField { .. } => "duplicate-field",
            CompileError::UnresolvableCrossReference { .. } => "unresolvable-cross-reference",
            CompileError::MissingListKey { .. } => "missing-list-key",
        }
    }
}
