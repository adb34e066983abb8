//! The top-level IR catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Directory, EnumCatalogEntry};

/// Compiled IR handed to code generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ir {
    pub meta: IrMeta,
    /// Directories keyed by schema path.
    pub directories: BTreeMap<String, Directory>,
    /// Enumerated types keyed by defining location.
    pub enums: BTreeMap<String, EnumCatalogEntry>,
}

impl Ir {
    /// Look up a directory by schema path.
    pub fn directory(&self, path: &str) -> Option<&Directory> {
        self.directories.get(path)
    }

    /// Look up a directory by generated name.
    pub fn directory_named(&self, name: &str) -> Option<&Directory> {
        self.directories.values().find(|d| d.name == name)
    }

    /// Look up an enumerated type by key.
    pub fn enum_entry(&self, key: &str) -> Option<&EnumCatalogEntry> {
        self.enums.get(key)
    }

    /// The synthetic root directory, if one was requested.
    pub fn fake_root(&self) -> Option<&Directory> {
        self.directories.values().find(|d| d.is_fake_root)
    }

    /// Directories whose parent is `path` in the compressed tree.
    pub fn children_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Directory> {
        self.directories
            .values()
            .filter(move |d| d.parent.as_deref() == Some(path))
    }
}

/// Provenance and settings the IR was compiled with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrMeta {
    /// Compression policy name (e.g. `prefer-intended-config`).
    pub policy: String,
    /// Modules compiled, sorted by name.
    pub modules: Vec<ModuleMeta>,
    /// Name of the synthetic root directory, when generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_root: Option<String>,
}

/// A compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
