//! Raw schema trees for the canopy compiler.
//!
//! A schema tree is the input boundary of the compiler: modules made of
//! containers, lists, leaves, leaf-lists, choices, cases and anydata nodes,
//! each with a config flag, an optional type and an ordered child map.
//!
//! # Architecture
//!
//! ```text
//! schema.json / schema.toml → canopy-schema (loading) → canopy-compiler (compression) → canopy-ir
//! ```
//!
//! Trees are read from JSON or TOML documents, validated structurally, and
//! resolved: every node learns its schema path, its data path and its
//! effective config value.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod module;
mod node;
mod parse;
mod types;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use module::{Module, ModuleSet};
pub use node::{ConfigFlag, Descendants, NodeKind, SchemaNode, join_path};
pub use parse::{SchemaFile, SchemaFormat, load_files, parse_module_set};
pub use types::TypeDescriptor;
pub use validate::ValidationContext;
