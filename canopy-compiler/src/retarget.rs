//! Cross-reference retargeting for operational-state compression.
//!
//! When state leaves win over config leaves, a leafref such as
//! `../config/name` would point at a shadowed leaf. Such references are
//! rewritten to the parallel `state` leaf.

use canopy_schema::{NodeKind, SchemaNode, TypeDescriptor};
use tracing::debug;

use crate::{CompileError, CompressionPolicy, policy};

/// Rewrite config-targeting leafrefs under `node` to point at state.
///
/// Only [`CompressionPolicy::PreferOperationalState`] rewrites anything.
/// References that are not shaped `.../config/<leaf>` are left unchanged.
pub fn retarget(node: &mut SchemaNode, policy: CompressionPolicy) -> Vec<CompileError> {
    let mut errors = Vec::new();
    if policy == CompressionPolicy::PreferOperationalState {
        retarget_node(node, &mut errors);
    }
    errors
}

fn retarget_node(node: &mut SchemaNode, errors: &mut Vec<CompileError>) {
    match node.kind {
        NodeKind::Leaf | NodeKind::LeafList => retarget_leaf(node, errors),
        NodeKind::Container | NodeKind::List | NodeKind::Choice | NodeKind::Case => {
            for child in node.children.values_mut() {
                retarget_node(child, errors);
            }
        }
        NodeKind::AnyData => {}
    }
}

fn retarget_leaf(leaf: &mut SchemaNode, errors: &mut Vec<CompileError>) {
    let location = leaf.schema_path().to_string();
    let Some(path) = leaf.ty.as_mut().and_then(leafref_path_mut) else {
        return;
    };

    if path.is_empty() {
        errors.push(CompileError::UnresolvableCrossReference {
            path: location,
            reference: String::new(),
        });
        return;
    }

    match retargeted_path(path) {
        Some(rewritten) => {
            debug!(leaf = %location, from = %path, to = %rewritten, "retargeted cross-reference");
            *path = rewritten;
        }
        None => debug!(leaf = %location, path = %path, "cross-reference left unchanged"),
    }
}

fn leafref_path_mut(ty: &mut TypeDescriptor) -> Option<&mut String> {
    match ty {
        TypeDescriptor::Leafref { path } => Some(path),
        TypeDescriptor::Typedef { base, .. } => leafref_path_mut(base),
        _ => None,
    }
}

/// `../config/name` -> `../state/name`, keeping any `prefix:` qualifier.
pub(crate) fn retargeted_path(path: &str) -> Option<String> {
    let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
    if segments.len() < 3 || segments[0] != ".." {
        return None;
    }

    let idx = segments.len() - 2;
    let replacement = match segments[idx].split_once(':') {
        Some((prefix, name)) if name == policy::CONFIG_CONTAINER => {
            format!("{}:{}", prefix, policy::STATE_CONTAINER)
        }
        None if segments[idx] == policy::CONFIG_CONTAINER => policy::STATE_CONTAINER.to_string(),
        _ => return None,
    };
    segments[idx] = replacement;
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use canopy_schema::Module;

    use super::*;

    fn leafref(path: &str) -> TypeDescriptor {
        TypeDescriptor::Leafref { path: path.into() }
    }

    fn module(path: &str) -> Module {
        Module::new(
            "m",
            [SchemaNode::container("interfaces").with_child(
                SchemaNode::list("interface", ["name"])
                    .with_child(SchemaNode::leaf("name", leafref(path)))
                    .with_child(
                        SchemaNode::container("config")
                            .with_child(SchemaNode::leaf("name", TypeDescriptor::String)),
                    ),
            )],
        )
    }

    fn key_path(module: &Module) -> &str {
        module.root().children["interfaces"].children["interface"].children["name"]
            .ty
            .as_ref()
            .and_then(TypeDescriptor::leafref_path)
            .unwrap_or_default()
    }

    #[test]
    fn test_retargeted_path() {
        assert_eq!(
            retargeted_path("../config/name"),
            Some("../state/name".into())
        );
        assert_eq!(
            retargeted_path("../oc-if:config/oc-if:name"),
            Some("../oc-if:state/oc-if:name".into())
        );
        assert_eq!(retargeted_path("../../config/name"), Some("../../state/name".into()));
        assert_eq!(retargeted_path("../name"), None);
        assert_eq!(retargeted_path("/interfaces/interface/config/name"), None);
        assert_eq!(retargeted_path("../state/name"), None);
    }

    #[test]
    fn test_retarget_rewrites_under_operational_state() {
        let mut module = module("../config/name");
        let errors = retarget(module.root_mut(), CompressionPolicy::PreferOperationalState);
        assert!(errors.is_empty());
        assert_eq!(key_path(&module), "../state/name");
    }

    #[test]
    fn test_retarget_noop_for_other_policies() {
        for policy in CompressionPolicy::ALL {
            if policy == CompressionPolicy::PreferOperationalState {
                continue;
            }
            let mut module = module("../config/name");
            assert!(retarget(module.root_mut(), policy).is_empty());
            assert_eq!(key_path(&module), "../config/name");
        }
    }

    #[test]
    fn test_retarget_leaves_other_shapes() {
        let mut module = module("../name");
        retarget(module.root_mut(), CompressionPolicy::PreferOperationalState);
        assert_eq!(key_path(&module), "../name");
    }

    #[test]
    fn test_empty_path_reported() {
        let mut module = module("");
        let errors = retarget(module.root_mut(), CompressionPolicy::PreferOperationalState);
        assert_eq!(
            errors,
            vec![CompileError::UnresolvableCrossReference {
                path: "/interfaces/interface/name".into(),
                reference: String::new(),
            }]
        );
    }

    #[test]
    fn test_retarget_through_typedef_and_choice() {
        let mut module = Module::new(
            "m",
            [SchemaNode::container("c").with_child(
                SchemaNode::choice("ch").with_child(SchemaNode::case("a").with_child(
                    SchemaNode::leaf_list(
                        "refs",
                        TypeDescriptor::Typedef {
                            name: "m:ref".into(),
                            base: Box::new(leafref("../config/id")),
                        },
                    ),
                )),
            )],
        );
        retarget(module.root_mut(), CompressionPolicy::PreferOperationalState);

        let refs = &module.root().children["c"].children["ch"].children["a"].children["refs"];
        assert_eq!(
            refs.ty.as_ref().and_then(TypeDescriptor::leafref_path),
            Some("../state/id")
        );
    }
}
