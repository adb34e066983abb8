//! Modules and module sets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{NodeKind, SchemaNode};

/// A schema module: a named set of top-level data nodes.
///
/// The top-level nodes are held by a synthetic container, [`Module::root`],
/// whose paths are `/`. Building a module resolves the paths and effective
/// config of every node underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawModule", into = "RawModule")]
pub struct Module {
    pub name: String,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    root: SchemaNode,
}

impl Module {
    /// Build a module from its top-level nodes.
    pub fn new(name: impl Into<String>, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        let name = name.into();
        let root = SchemaNode::new(name.clone(), NodeKind::Container).with_children(children);
        Self::from_root(name, None, None, root)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn from_root(
        name: String,
        prefix: Option<String>,
        namespace: Option<String>,
        mut root: SchemaNode,
    ) -> Self {
        root.resolve_as_module_root();
        Self {
            name,
            prefix,
            namespace,
            root,
        }
    }

    /// The synthetic container holding the module's top-level nodes.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Mutable access to the module's tree.
    ///
    /// Only types may be rewritten through this handle; changing names or
    /// structure leaves resolved paths stale.
    pub fn root_mut(&mut self) -> &mut SchemaNode {
        &mut self.root
    }

    /// Top-level data nodes in source order.
    pub fn top_level(&self) -> impl Iterator<Item = &SchemaNode> {
        self.root.children.values()
    }
}

/// On-disk shape of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawModule {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default)]
    children: IndexMap<String, SchemaNode>,
}

impl From<RawModule> for Module {
    fn from(raw: RawModule) -> Self {
        let mut root = SchemaNode::new(raw.name.clone(), NodeKind::Container);
        root.children = raw.children;
        Module::from_root(raw.name, raw.prefix, raw.namespace, root)
    }
}

impl From<Module> for RawModule {
    fn from(module: Module) -> Self {
        RawModule {
            name: module.name,
            prefix: module.prefix,
            namespace: module.namespace,
            children: module.root.children,
        }
    }
}

/// An ordered collection of modules compiled together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSet {
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl ModuleSet {
    pub fn new(modules: impl IntoIterator<Item = Module>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
        }
    }

    /// Find a module by name.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Module> {
        self.modules.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Append the modules of another set.
    pub fn extend(&mut self, other: ModuleSet) {
        self.modules.extend(other.modules);
    }

    /// Modules sorted by name, for deterministic traversal.
    pub fn sorted(&self) -> Vec<&Module> {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        modules
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeDescriptor;

    #[test]
    fn test_module_resolves_top_level_paths() {
        let module = Module::new(
            "openconfig-system",
            [SchemaNode::container("system")
                .with_child(SchemaNode::leaf("hostname", TypeDescriptor::String))],
        );

        let system = &module.root().children["system"];
        assert_eq!(module.root().schema_path(), "/");
        assert_eq!(system.schema_path(), "/system");
        assert_eq!(system.children["hostname"].data_path(), "/system/hostname");
    }

    #[test]
    fn test_module_round_trips_through_raw_shape() {
        let json = r#"{
            "name": "m",
            "prefix": "m",
            "children": {
                "top": {"kind": "container", "children": {
                    "leaf": {"kind": "leaf", "type": {"kind": "string"}}
                }}
            }
        }"#;
        let module: Module = serde_json::from_str(json).expect("valid module");
        assert_eq!(module.prefix.as_deref(), Some("m"));
        assert_eq!(
            module.root().children["top"].children["leaf"].schema_path(),
            "/top/leaf"
        );
        assert_eq!(module.root().children["top"].name, "top");
    }

    #[test]
    fn test_module_set_sorted() {
        let set = ModuleSet::new([Module::new("b", []), Module::new("a", [])]);
        let names: Vec<_> = set.sorted().into_iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(set.get("b").is_some());
        assert_eq!(set.len(), 2);
    }
}
