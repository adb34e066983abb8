//! Raw schema tree nodes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TypeDescriptor;

/// Kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Container,
    List,
    Leaf,
    LeafList,
    Choice,
    Case,
    #[serde(rename = "anydata")]
    AnyData,
}

impl NodeKind {
    /// Get the schema keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
            NodeKind::Choice => "choice",
            NodeKind::Case => "case",
            NodeKind::AnyData => "anydata",
        }
    }

    /// Containers and lists become directories in the IR.
    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Container | NodeKind::List)
    }

    /// Choices and cases carry no data and are flattened through.
    pub fn is_choice_or_case(&self) -> bool {
        matches!(self, NodeKind::Choice | NodeKind::Case)
    }

    /// Leaves and leaf-lists carry a type.
    pub fn is_leaf_like(&self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::LeafList)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The config statement as written on a node.
///
/// Deserializes from an optional boolean; a missing value is
/// [`ConfigFlag::Inherited`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum ConfigFlag {
    True,
    False,
    #[default]
    Inherited,
}

impl ConfigFlag {
    /// Returns true if no explicit config statement was given.
    pub fn is_inherited(&self) -> bool {
        matches!(self, ConfigFlag::Inherited)
    }
}

impl From<Option<bool>> for ConfigFlag {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => ConfigFlag::True,
            Some(false) => ConfigFlag::False,
            None => ConfigFlag::Inherited,
        }
    }
}

impl From<ConfigFlag> for Option<bool> {
    fn from(value: ConfigFlag) -> Self {
        match value {
            ConfigFlag::True => Some(true),
            ConfigFlag::False => Some(false),
            ConfigFlag::Inherited => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A node of the raw schema tree.
///
/// Children are keyed by name and keep source order. The node's own `name`
/// is taken from its key in the parent's child map. Paths and the effective
/// config value are resolved once, when the owning [`Module`](crate::Module)
/// is built (or via [`SchemaNode::resolve_root`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(skip)]
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "ConfigFlag::is_inherited")]
    pub config: ConfigFlag,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeDescriptor>,
    /// Key leaf names, in declaration order (lists only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, SchemaNode>,
    #[serde(skip)]
    schema_path: String,
    #[serde(skip)]
    data_path: String,
    #[serde(skip, default = "default_true")]
    effective_config: bool,
}

impl SchemaNode {
    /// Create a node with no children.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        let name = name.into();
        let path = format!("/{}", name);
        Self {
            name,
            kind,
            config: ConfigFlag::Inherited,
            ty: None,
            keys: Vec::new(),
            description: None,
            children: IndexMap::new(),
            schema_path: path.clone(),
            data_path: path,
            effective_config: true,
        }
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Container)
    }

    /// Create a list keyed by `keys`.
    pub fn list<I, S>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = Self::new(name, NodeKind::List);
        node.keys = keys.into_iter().map(Into::into).collect();
        node
    }

    pub fn leaf(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let mut node = Self::new(name, NodeKind::Leaf);
        node.ty = Some(ty);
        node
    }

    pub fn leaf_list(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let mut node = Self::new(name, NodeKind::LeafList);
        node.ty = Some(ty);
        node
    }

    pub fn choice(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Choice)
    }

    pub fn case(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Case)
    }

    pub fn anydata(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::AnyData)
    }

    /// Set an explicit config statement.
    pub fn with_config(mut self, config: bool) -> Self {
        self.config = ConfigFlag::from(Some(config));
        self.effective_config = config;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a child, keyed by its name.
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.insert(child.name.clone(), child);
        self
    }

    /// Append several children in order.
    pub fn with_children(self, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        children.into_iter().fold(self, SchemaNode::with_child)
    }

    /// Absolute schema path, including choice and case nodes.
    pub fn schema_path(&self) -> &str {
        &self.schema_path
    }

    /// Absolute data path, with choice and case nodes elided.
    pub fn data_path(&self) -> &str {
        &self.data_path
    }

    /// Effective config value after inheritance.
    pub fn is_config(&self) -> bool {
        self.effective_config
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn is_list(&self) -> bool {
        self.kind == NodeKind::List
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    pub fn is_choice_or_case(&self) -> bool {
        self.kind.is_choice_or_case()
    }

    pub fn is_leaf_like(&self) -> bool {
        self.kind.is_leaf_like()
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.get(name)
    }

    /// Resolve paths and config as a top-level node of a module.
    pub fn resolve_root(mut self) -> Self {
        self.resolve("/", "/", true);
        self
    }

    /// Resolve this node as the synthetic root of a module: its own paths
    /// are `/` and its children become top-level nodes.
    pub(crate) fn resolve_as_module_root(&mut self) {
        self.schema_path = "/".into();
        self.data_path = "/".into();
        self.effective_config = true;
        self.resolve_children();
    }

    fn resolve(&mut self, parent_schema: &str, parent_data: &str, parent_config: bool) {
        self.schema_path = join_path(parent_schema, &self.name);
        self.data_path = if self.kind.is_choice_or_case() {
            parent_data.to_string()
        } else {
            join_path(parent_data, &self.name)
        };
        self.effective_config = parent_config && self.config != ConfigFlag::False;
        self.resolve_children();
    }

    fn resolve_children(&mut self) {
        for (name, child) in &mut self.children {
            child.name.clone_from(name);
            child.resolve(&self.schema_path, &self.data_path, self.effective_config);
        }
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`SchemaNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values().rev());
        Some(node)
    }
}

/// Join a child name onto an absolute path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" || parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interfaces() -> SchemaNode {
        SchemaNode::container("interfaces")
            .with_child(
                SchemaNode::list("interface", ["name"])
                    .with_child(SchemaNode::leaf(
                        "name",
                        TypeDescriptor::Leafref {
                            path: "../config/name".into(),
                        },
                    ))
                    .with_child(
                        SchemaNode::container("state")
                            .with_config(false)
                            .with_child(SchemaNode::leaf("name", TypeDescriptor::String))
                            .with_child(
                                SchemaNode::choice("mode").with_child(
                                    SchemaNode::case("fast")
                                        .with_child(SchemaNode::leaf("rate", TypeDescriptor::Uint8)),
                                ),
                            ),
                    ),
            )
            .resolve_root()
    }

    #[test]
    fn test_resolve_paths() {
        let root = interfaces();
        let rate = &root.children["interface"].children["state"].children["mode"].children["fast"]
            .children["rate"];

        assert_eq!(root.schema_path(), "/interfaces");
        assert_eq!(
            rate.schema_path(),
            "/interfaces/interface/state/mode/fast/rate"
        );
        assert_eq!(rate.data_path(), "/interfaces/interface/state/rate");
    }

    #[test]
    fn test_config_inherited_from_ancestor() {
        let root = interfaces();
        let list = &root.children["interface"];
        assert!(root.is_config());
        assert!(list.children["name"].is_config());
        assert!(!list.children["state"].children["name"].is_config());
    }

    #[test]
    fn test_config_true_under_state_resolves_false() {
        let root = SchemaNode::container("top")
            .with_config(false)
            .with_child(SchemaNode::leaf("x", TypeDescriptor::String).with_config(true))
            .resolve_root();
        assert!(!root.children["x"].is_config());
    }

    #[test]
    fn test_descendants_preorder() {
        let root = interfaces();
        let names: Vec<_> = root.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "interfaces",
                "interface",
                "name",
                "state",
                "name",
                "mode",
                "fast",
                "rate"
            ]
        );
    }

    #[test]
    fn test_config_flag_serde() {
        let node: SchemaNode =
            serde_json::from_str(r#"{"kind": "container", "config": false}"#).expect("valid");
        assert_eq!(node.config, ConfigFlag::False);

        let node: SchemaNode = serde_json::from_str(r#"{"kind": "leaf-list", "type": {"kind": "string"}}"#)
            .expect("valid");
        assert_eq!(node.config, ConfigFlag::Inherited);
        assert_eq!(node.kind, NodeKind::LeafList);
    }
}
