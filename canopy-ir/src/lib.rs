//! Intermediate representation types for the canopy schema compiler.
//!
//! The IR is the sole contract handed to code generators: a catalog of
//! directories (one per generated type) keyed by schema path, a catalog of
//! enumerated types keyed by defining location, and module provenance.
//!
//! # Architecture
//!
//! ```text
//! schema tree → canopy-compiler (compression, assembly) → canopy-ir → generators
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no target-language naming or layout concerns)
//! - Deterministic (every map is ordered, so serialized output is stable)
//! - Self-contained (no dependency on the schema tree types)

mod directory;
mod ir;
mod types;

pub use directory::{Directory, DirectoryKind, FieldDetails, FieldKind, KeyDetails};
pub use ir::{Ir, IrMeta, ModuleMeta};
pub use types::{EnumCatalogEntry, EnumKind, TypeBinding};
