//! Type bindings and the enumerated type catalog.

use serde::{Deserialize, Serialize};

/// The resolved type of a leaf or leaf-list field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeBinding {
    /// A builtin scalar type, by its schema name (e.g. `uint32`).
    Builtin { name: String },
    /// An entry of the enum catalog.
    Enumerated { key: String },
    /// A union of member bindings, in declaration order.
    Union { members: Vec<TypeBinding> },
    /// A cross-reference; `target` is the binding of the referenced leaf
    /// when it could be resolved.
    Leafref {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Box<TypeBinding>>,
    },
}

impl TypeBinding {
    pub fn builtin(name: impl Into<String>) -> Self {
        TypeBinding::Builtin { name: name.into() }
    }

    pub fn enumerated(key: impl Into<String>) -> Self {
        TypeBinding::Enumerated { key: key.into() }
    }

    /// Follow resolved leafrefs to the binding that carries the value.
    pub fn resolved(&self) -> &TypeBinding {
        match self {
            TypeBinding::Leafref {
                target: Some(target),
                ..
            } => target.resolved(),
            other => other,
        }
    }

    /// Every enum catalog key referenced by this binding.
    pub fn enum_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_enum_keys(&mut keys);
        keys
    }

    fn collect_enum_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            TypeBinding::Builtin { .. } => {}
            TypeBinding::Enumerated { key } => keys.push(key),
            TypeBinding::Union { members } => {
                for member in members {
                    member.collect_enum_keys(keys);
                }
            }
            TypeBinding::Leafref { target, .. } => {
                if let Some(target) = target {
                    target.collect_enum_keys(keys);
                }
            }
        }
    }
}

/// How an enumerated type was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    /// Inline enumeration on a leaf.
    SimpleEnumeration,
    /// Enumeration defined by a typedef.
    DerivedEnumeration,
    /// Identities derived from a base identity.
    Identity,
    /// Inline enumeration inside an inline union.
    UnionEnumeration,
    /// Inline enumeration inside a union typedef.
    DerivedUnionEnumeration,
}

impl EnumKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumKind::SimpleEnumeration => "simple_enumeration",
            EnumKind::DerivedEnumeration => "derived_enumeration",
            EnumKind::Identity => "identity",
            EnumKind::UnionEnumeration => "union_enumeration",
            EnumKind::DerivedUnionEnumeration => "derived_union_enumeration",
        }
    }
}

/// One generated enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCatalogEntry {
    /// Defining location (schema path, typedef or identity name).
    pub key: String,
    /// Generated type name, unique across the catalog.
    pub name: String,
    pub kind: EnumKind,
    /// Value names in declaration order.
    pub values: Vec<String>,
    /// Module of the typedef or identity, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defining_module: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_follows_leafrefs() {
        let binding = TypeBinding::Leafref {
            path: "../config/name".into(),
            target: Some(Box::new(TypeBinding::Leafref {
                path: "../name".into(),
                target: Some(Box::new(TypeBinding::builtin("string"))),
            })),
        };
        assert_eq!(binding.resolved(), &TypeBinding::builtin("string"));
    }

    #[test]
    fn test_unresolved_leafref_is_its_own_binding() {
        let binding = TypeBinding::Leafref {
            path: "/missing".into(),
            target: None,
        };
        assert_eq!(binding.resolved(), &binding);
    }

    #[test]
    fn test_enum_keys_through_union() {
        let binding = TypeBinding::Union {
            members: vec![
                TypeBinding::builtin("uint32"),
                TypeBinding::enumerated("openconfig-types:admin-status"),
                TypeBinding::Leafref {
                    path: "../type".into(),
                    target: Some(Box::new(TypeBinding::enumerated("ietf:iana-if-type"))),
                },
            ],
        };
        assert_eq!(
            binding.enum_keys(),
            vec!["openconfig-types:admin-status", "ietf:iana-if-type"]
        );
    }

    #[test]
    fn test_binding_serializes_tagged() {
        let json = serde_json::to_string(&TypeBinding::enumerated("k")).expect("serializes");
        assert_eq!(json, r#"{"kind":"enumerated","key":"k"}"#);
    }
}
