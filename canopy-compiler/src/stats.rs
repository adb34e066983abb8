//! Summary figures computed from a finished IR.

use canopy_ir::Ir;
use serde::Serialize;

/// Counts describing an IR, computed once by the analyze phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IrStats {
    pub directories: usize,
    pub lists: usize,
    pub fields: usize,
    pub keys: usize,
    /// Fields that carry a shadow path.
    pub shadowed_fields: usize,
    pub enums: usize,
    pub has_fake_root: bool,
}

impl IrStats {
    pub fn from_ir(ir: &Ir) -> Self {
        let mut stats = Self {
            directories: ir.directories.len(),
            enums: ir.enums.len(),
            has_fake_root: ir.fake_root().is_some(),
            ..Self::default()
        };
        for dir in ir.directories.values() {
            if dir.is_list() {
                stats.lists += 1;
            }
            stats.fields += dir.fields.len();
            stats.keys += dir.list_keys.len();
            stats.shadowed_fields += dir
                .fields
                .values()
                .chain(dir.list_keys.values().map(|k| &k.field))
                .filter(|f| f.shadow_source_path.is_some())
                .count();
        }
        stats
    }
}
