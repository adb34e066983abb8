//! Binding leaf types to builtins, catalog entries and leafref targets.

use canopy_ir::{EnumKind, TypeBinding};
use canopy_schema::{SchemaNode, TypeDescriptor};
use tracing::debug;

use super::Assembler;
use crate::{
    CompileError,
    naming::{qualified_name, to_pascal_case},
    policy,
};

/// Leafref chains longer than this are treated as unresolvable.
const MAX_LEAFREF_DEPTH: usize = 8;

impl<'a> Assembler<'a> {
    pub(super) fn bind(&mut self, leaf: &SchemaNode, ty: &TypeDescriptor) -> TypeBinding {
        self.bind_at(leaf, ty, 0)
    }

    fn bind_at(&mut self, leaf: &SchemaNode, ty: &TypeDescriptor, depth: usize) -> TypeBinding {
        let (base, typedef) = ty.resolve();
        match base {
            TypeDescriptor::Enumeration { values } => {
                let key = match typedef {
                    Some(typedef) => self.derived_enum(leaf, typedef, values),
                    None => self.simple_enum(leaf, values),
                };
                TypeBinding::enumerated(key)
            }
            TypeDescriptor::Identityref {
                base: identity,
                values,
            } => {
                let module = Some(self.defining_module(identity));
                let key = self.enums.insert(
                    identity.clone(),
                    EnumKind::Identity,
                    values,
                    qualified_name(identity),
                    module,
                );
                TypeBinding::enumerated(key)
            }
            TypeDescriptor::Union { types } => {
                let total = inline_enum_count(types);
                let mut index = 0;
                TypeBinding::Union {
                    members: self.union_members(leaf, types, typedef, total, &mut index, depth),
                }
            }
            TypeDescriptor::Leafref { path } => self.bind_leafref(leaf, path, depth),
            other => TypeBinding::builtin(other.builtin_name().unwrap_or_default()),
        }
    }

    fn bind_leafref(&mut self, leaf: &SchemaNode, path: &str, depth: usize) -> TypeBinding {
        let target = if depth < MAX_LEAFREF_DEPTH {
            self.leaves
                .resolve(leaf, path)
                .and_then(|node| node.ty.as_ref().map(|ty| (node, ty)))
        } else {
            None
        };

        let target = match target {
            Some((node, ty)) => Some(Box::new(self.bind_at(node, ty, depth + 1))),
            None => {
                debug!(leaf = leaf.schema_path(), path, "unresolved cross-reference");
                self.errors.push(CompileError::UnresolvableCrossReference {
                    path: leaf.schema_path().to_string(),
                    reference: path.to_string(),
                });
                None
            }
        };
        TypeBinding::Leafref {
            path: path.to_string(),
            target,
        }
    }

    fn union_members(
        &mut self,
        leaf: &SchemaNode,
        types: &[TypeDescriptor],
        union_typedef: Option<&str>,
        total: usize,
        index: &mut usize,
        depth: usize,
    ) -> Vec<TypeBinding> {
        let mut members = Vec::with_capacity(types.len());
        for member in types {
            let binding = match member {
                TypeDescriptor::Enumeration { values } => {
                    let suffix = (total > 1).then_some(*index);
                    *index += 1;
                    TypeBinding::enumerated(self.union_enum(leaf, values, union_typedef, suffix))
                }
                TypeDescriptor::Union { types: nested } => TypeBinding::Union {
                    members: self.union_members(leaf, nested, union_typedef, total, index, depth),
                },
                _ => self.bind_at(leaf, member, depth),
            };
            members.push(binding);
        }
        members
    }

    fn derived_enum(&mut self, leaf: &SchemaNode, typedef: &str, values: &[String]) -> String {
        let module = Some(self.defining_module(typedef));
        if self.options.skip_enum_dedup {
            let key = format!("{}#{}", self.leaf_enum_key(leaf), typedef);
            let name = self.leaf_enum_name(leaf);
            return self
                .enums
                .insert(key, EnumKind::DerivedEnumeration, values, name, module);
        }
        self.enums.insert(
            typedef.to_string(),
            EnumKind::DerivedEnumeration,
            values,
            qualified_name(typedef),
            module,
        )
    }

    fn union_enum(
        &mut self,
        leaf: &SchemaNode,
        values: &[String],
        union_typedef: Option<&str>,
        suffix: Option<usize>,
    ) -> String {
        let (kind, key, name, module) = match union_typedef {
            Some(typedef) if !self.options.skip_enum_dedup => (
                EnumKind::DerivedUnionEnumeration,
                typedef.to_string(),
                qualified_name(typedef),
                self.defining_module(typedef),
            ),
            Some(typedef) => (
                EnumKind::DerivedUnionEnumeration,
                format!("{}#{}", self.leaf_enum_key(leaf), typedef),
                self.leaf_enum_name(leaf),
                self.defining_module(typedef),
            ),
            None => (
                EnumKind::UnionEnumeration,
                self.leaf_enum_key(leaf),
                self.leaf_enum_name(leaf),
                self.module.clone(),
            ),
        };
        let (key, name) = match suffix {
            Some(i) => (format!("{}[{}]", key, i), format!("{}_{}", name, i)),
            None => (key, name),
        };
        self.enums.insert(key, kind, values, name, Some(module))
    }

    fn simple_enum(&mut self, leaf: &SchemaNode, values: &[String]) -> String {
        let key = self.leaf_enum_key(leaf);
        let name = self.leaf_enum_name(leaf);
        let module = Some(self.module.clone());
        self.enums
            .insert(key, EnumKind::SimpleEnumeration, values, name, module)
    }

    /// Catalog key for an enumeration defined on a leaf: its data path,
    /// without the `config`/`state` element when compressing so that both
    /// copies of a leaf share one entry.
    fn leaf_enum_key(&self, leaf: &SchemaNode) -> String {
        let mut segments: Vec<&str> = leaf.data_path().split('/').collect();
        let n = segments.len();
        if self.policy.compress_enabled()
            && n >= 3
            && matches!(
                segments[n - 2],
                policy::CONFIG_CONTAINER | policy::STATE_CONTAINER
            )
        {
            segments.remove(n - 2);
        }
        segments.join("/")
    }

    /// `Parent_Leaf` from the last two elements of the leaf's key.
    fn leaf_enum_name(&self, leaf: &SchemaNode) -> String {
        let key = self.leaf_enum_key(leaf);
        let mut segments = key.rsplit('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(name), Some(parent)) => {
                format!("{}_{}", to_pascal_case(parent), to_pascal_case(name))
            }
            (Some(name), None) => to_pascal_case(name),
            _ => to_pascal_case(&leaf.name),
        }
    }

    /// Module part of a `module:name` identifier, defaulting to the module
    /// being assembled.
    fn defining_module(&self, identifier: &str) -> String {
        identifier
            .split_once(':')
            .map_or_else(|| self.module.clone(), |(module, _)| module.to_string())
    }
}

/// Inline enumerations of a union, counting through inline nested unions.
fn inline_enum_count(types: &[TypeDescriptor]) -> usize {
    types
        .iter()
        .map(|t| match t {
            TypeDescriptor::Enumeration { .. } => 1,
            TypeDescriptor::Union { types } => inline_enum_count(types),
            _ => 0,
        })
        .sum()
}
