//! Schema compression compiler for canopy.
//!
//! Turns raw schema trees into the IR consumed by code generators:
//!
//! - [`extract`] decides which nodes become fields of a directory under a
//!   [`CompressionPolicy`]
//! - [`retarget`] rewrites leafrefs when operational state is preferred
//! - [`build_ir`] walks the compressed tree and assembles the [`Ir`]
//! - [`pipeline`] chains validation, transformation, lowering and analysis
//!   with diagnostics and plugin hooks
//!
//! [`Ir`]: canopy_ir::Ir

mod assemble;
mod error;
mod extract;
pub mod naming;
mod options;
pub mod pipeline;
mod policy;
mod retarget;
mod stats;

pub use assemble::{DEFAULT_FAKE_ROOT, IrOptions, build_ir};
use canopy_ir::Ir;
use canopy_schema::ModuleSet;
pub use error::CompileError;
pub use extract::{Extraction, extract};
pub use options::CompileOptions;
pub use policy::{CONFIG_CONTAINER, CompressionPolicy, ParsePolicyError, STATE_CONTAINER};
pub use retarget::retarget;
pub use stats::IrStats;

/// Retarget a copy of `modules` and build its IR in one step.
///
/// The input is left untouched.
pub fn compile_modules(
    modules: &ModuleSet,
    policy: CompressionPolicy,
    options: &IrOptions,
) -> (Ir, Vec<CompileError>) {
    let mut modules = modules.clone();
    let mut errors = Vec::new();
    for module in modules.iter_mut() {
        errors.extend(retarget(module.root_mut(), policy));
    }
    let (ir, assembly_errors) = build_ir(&modules, policy, options);
    errors.extend(assembly_errors);
    (ir, errors)
}
