//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - lints the schema trees and collects diagnostics
//! - [`TransformPhase`] - retargets cross-references for the policy
//! - [`LowerPhase`] - builds the IR
//! - [`AnalyzePhase`] - computes statistics from the IR

mod analyze;
mod lower;
mod transform;
mod validate;

pub use analyze::AnalyzePhase;
pub use lower::LowerPhase;
pub use transform::TransformPhase;
pub use validate::{
    ConfigUnderStateLint, DuplicateModuleLint, KeylessConfigListLint, Lint, LintInfo,
    ValidatePhase,
};
