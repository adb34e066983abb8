//! Structural validation of loaded schema trees.

use miette::SourceSpan;

use crate::{Module, NodeKind, Result, SchemaNode, error::SourceContext};

/// Validation context that carries source information down the tree.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    source: &'a SourceContext,
}

impl<'a> ValidationContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self { source }
    }

    /// Validate every node of a module.
    pub fn validate_module(&self, module: &Module) -> Result<()> {
        if module.name.is_empty() {
            return Err(self
                .source
                .validation_error("/", "module name must not be empty", None));
        }
        for child in module.top_level() {
            self.validate_node(child, None)?;
        }
        Ok(())
    }

    fn validate_node(&self, node: &SchemaNode, parent: Option<NodeKind>) -> Result<()> {
        if let Some(message) = structural_problem(node, parent) {
            return Err(self.source.validation_error(
                node.schema_path(),
                message,
                find_name_span(self.source.src(), &node.name),
            ));
        }
        for child in node.children.values() {
            self.validate_node(child, Some(node.kind))?;
        }
        Ok(())
    }
}

/// Describe why `node` is structurally invalid, if it is.
fn structural_problem(node: &SchemaNode, parent: Option<NodeKind>) -> Option<String> {
    if node.name.is_empty() {
        return Some("node name must not be empty".into());
    }
    if node.name.contains('/') {
        return Some("node name must not contain '/'".into());
    }
    if node.kind.is_leaf_like() && node.ty.is_none() {
        return Some(format!("{} must declare a type", node.kind));
    }
    if !node.kind.is_leaf_like() && node.ty.is_some() {
        return Some(format!("{} cannot declare a type", node.kind));
    }
    if !node.is_list() && !node.keys.is_empty() {
        return Some(format!("{} cannot declare keys", node.kind));
    }
    let childless = matches!(
        node.kind,
        NodeKind::Leaf | NodeKind::LeafList | NodeKind::AnyData
    );
    if childless && !node.children.is_empty() {
        return Some(format!("{} cannot have children", node.kind));
    }
    if node.kind == NodeKind::Case && parent != Some(NodeKind::Choice) {
        return Some("case must appear directly under a choice".into());
    }
    None
}

/// Find the span of a node name in JSON (`"name":`) or TOML (`.name]`,
/// `name = {`) source. No fallback: better no span than a wrong one.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        (format!("\"{}\":", name), 1usize),
        (format!("\"{}\" :", name), 1usize),
        (format!(".{}]", name), 1usize),
        (format!(".{}.", name), 1usize),
        (format!("{} = {{", name), 0usize),
    ];

    for (pattern, skip) in &patterns {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }
    None
}
