//! Compilation pipeline.
//!
//! [`Pipeline`] runs the compiler as a sequence of phases over a shared
//! [`CompilationContext`]:
//!
//! - Explicit phase boundaries (validate → transform → lower → analyze)
//! - Plugin hooks before and after each phase
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use canopy_compiler::{CompileOptions, pipeline::Pipeline};
//!
//! let options = CompileOptions { compress_paths: true, ..Default::default() };
//! let ctx = Pipeline::new().run(modules, options)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let ir = ctx.ir;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::{Pipeline, PhaseInfo};
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
