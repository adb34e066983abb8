//! Built-in lints for schema validation.

mod config_under_state;
mod duplicate_module;
mod keyless_config_list;

pub use config_under_state::ConfigUnderStateLint;
pub use duplicate_module::DuplicateModuleLint;
pub use keyless_config_list::KeylessConfigListLint;
