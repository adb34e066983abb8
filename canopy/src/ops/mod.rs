//! Core operations.
//!
//! This module contains the business logic for canopy commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod compile;
pub mod explain;

pub use check::check;
pub use compile::{CompileTarget, compile};
pub use explain::explain;
