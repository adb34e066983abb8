//! Leafref target lookup.

use std::collections::HashMap;

use canopy_schema::{Module, SchemaNode};

use crate::naming::strip_prefix;

/// Leaves and leaf-lists of every compiled module, by data path.
pub(crate) struct LeafIndex<'a> {
    by_data_path: HashMap<&'a str, &'a SchemaNode>,
}

impl<'a> LeafIndex<'a> {
    pub fn build(modules: &[&'a Module]) -> Self {
        let mut by_data_path = HashMap::new();
        for &module in modules {
            for node in module.root().descendants().filter(|n| n.is_leaf_like()) {
                by_data_path.entry(node.data_path()).or_insert(node);
            }
        }
        Self { by_data_path }
    }

    /// Find the leaf referenced by `path`, evaluated from `leaf`.
    pub fn resolve(&self, leaf: &SchemaNode, path: &str) -> Option<&'a SchemaNode> {
        let target = target_data_path(leaf.data_path(), path)?;
        self.by_data_path.get(target.as_str()).copied()
    }
}

/// Absolute data path named by a leafref `path` evaluated at `from`.
///
/// Prefixes and predicates are dropped; `None` if the path climbs above
/// the root or is empty.
pub(crate) fn target_data_path(from: &str, path: &str) -> Option<String> {
    let path = strip_predicates(path);
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = if path.starts_with('/') {
        Vec::new()
    } else {
        from.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment {
            ".." => {
                segments.pop()?;
            }
            "." => {}
            other => segments.push(strip_prefix(other)),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

fn strip_predicates(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use canopy_schema::TypeDescriptor;

    use super::*;

    #[test]
    fn test_relative_paths() {
        assert_eq!(
            target_data_path("/interfaces/interface/name", "../config/name").as_deref(),
            Some("/interfaces/interface/config/name")
        );
        assert_eq!(
            target_data_path("/a/b/c", "../../x").as_deref(),
            Some("/a/x")
        );
        assert_eq!(target_data_path("/a", "../../x"), None);
    }

    #[test]
    fn test_absolute_paths_with_prefixes_and_predicates() {
        assert_eq!(
            target_data_path(
                "/unused",
                "/oc-if:interfaces/oc-if:interface[oc-if:name=current()/../name]/oc-if:config/oc-if:mtu"
            )
            .as_deref(),
            Some("/interfaces/interface/config/mtu")
        );
        assert_eq!(target_data_path("/a", ""), None);
    }

    #[test]
    fn test_index_resolves_leaves() {
        let module = Module::new(
            "m",
            [SchemaNode::container("system").with_children([
                SchemaNode::leaf("hostname", TypeDescriptor::String),
                SchemaNode::leaf(
                    "alias",
                    TypeDescriptor::Leafref {
                        path: "../hostname".into(),
                    },
                ),
            ])],
        );
        let index = LeafIndex::build(&[&module]);
        let alias = &module.root().children["system"].children["alias"];

        let target = index.resolve(alias, "../hostname");
        assert_eq!(target.map(SchemaNode::schema_path), Some("/system/hostname"));
        assert!(index.resolve(alias, "../missing").is_none());
    }
}
