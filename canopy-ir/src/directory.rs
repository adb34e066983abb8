//! Directories and their fields.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TypeBinding;

/// Kind of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryKind {
    Container,
    List,
}

/// A generated type: one per container or list of the compressed tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    /// Generated type name, unique across the IR.
    pub name: String,
    /// Schema path of the node this directory was built from.
    pub path: String,
    pub kind: DirectoryKind,
    /// Module defining the node.
    pub module: String,
    /// Path of the enclosing directory in the compressed tree.
    pub parent: Option<String>,
    /// Effective config value of the node.
    pub config: bool,
    /// Fields by name (list keys excluded).
    pub fields: BTreeMap<String, FieldDetails>,
    /// Key leaves of a list, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub list_keys: IndexMap<String, KeyDetails>,
    /// Key leaf whose name equals the list's own name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_key_collision: Option<String>,
    #[serde(default)]
    pub is_fake_root: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Directory {
    pub fn is_list(&self) -> bool {
        self.kind == DirectoryKind::List
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDetails> {
        self.fields.get(name)
    }

    /// Field names in emission order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Key names in declaration order.
    pub fn key_names(&self) -> impl Iterator<Item = &str> {
        self.list_keys.keys().map(String::as_str)
    }

    /// Fields that point at child directories.
    pub fn child_directory_fields(&self) -> impl Iterator<Item = &FieldDetails> {
        self.fields.values().filter(|f| f.kind.is_directory())
    }
}

/// Kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Leaf,
    LeafList,
    Container,
    List,
    AnyData,
}

impl FieldKind {
    /// Containers and lists are fields that own a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, FieldKind::Container | FieldKind::List)
    }

    pub fn is_leaf_like(&self) -> bool {
        matches!(self, FieldKind::Leaf | FieldKind::LeafList)
    }
}

/// A field of a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDetails {
    pub name: String,
    /// Schema path of the node backing the field.
    pub source_path: String,
    /// Schema path of the duplicate suppressed by compression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_source_path: Option<String>,
    /// Data path relative to the owning directory (e.g. `config/name`).
    pub data_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_data_path: Option<String>,
    pub kind: FieldKind,
    pub config: bool,
    /// Type of a leaf or leaf-list, resolved against the enum catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_binding: Option<TypeBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A list key, moved out of the list's ordinary fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDetails {
    pub name: String,
    pub field: FieldDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, kind: FieldKind) -> FieldDetails {
        FieldDetails {
            name: name.into(),
            source_path: format!("/top/{}", name),
            shadow_source_path: None,
            data_path: name.into(),
            shadow_data_path: None,
            kind,
            config: true,
            type_binding: None,
            description: None,
        }
    }

    fn directory() -> Directory {
        let mut fields = BTreeMap::new();
        for f in [field("mtu", FieldKind::Leaf), field("counters", FieldKind::Container)] {
            fields.insert(f.name.clone(), f);
        }
        Directory {
            name: "Top".into(),
            path: "/top".into(),
            kind: DirectoryKind::Container,
            module: "m".into(),
            parent: None,
            config: true,
            fields,
            list_keys: IndexMap::new(),
            list_key_collision: None,
            is_fake_root: false,
            description: None,
        }
    }

    #[test]
    fn test_field_names_sorted() {
        let dir = directory();
        let names: Vec<_> = dir.field_names().collect();
        assert_eq!(names, vec!["counters", "mtu"]);
    }

    #[test]
    fn test_child_directory_fields() {
        let dir = directory();
        let children: Vec<_> = dir.child_directory_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(children, vec!["counters"]);
        assert!(!dir.is_list());
    }

    #[test]
    fn test_key_names_in_declaration_order() {
        let mut dir = directory();
        dir.kind = DirectoryKind::List;
        for name in ["vrf", "address"] {
            dir.list_keys.insert(
                name.into(),
                KeyDetails {
                    name: name.into(),
                    field: field(name, FieldKind::Leaf),
                },
            );
        }
        let keys: Vec<_> = dir.key_names().collect();
        assert_eq!(keys, vec!["vrf", "address"]);
        assert!(dir.is_list());
    }

    #[test]
    fn test_serialize_skips_empty_keys() {
        let json = serde_json::to_value(directory()).expect("serializes");
        assert!(json.get("list_keys").is_none());
        assert_eq!(json["kind"], "container");
        assert_eq!(json["fields"]["mtu"]["kind"], "leaf");
    }
}
