//! Field extraction: which schema nodes become fields of a directory.
//!
//! Under compression, `config` and `state` containers are flattened into
//! their parent, containers that only wrap a list are skipped, and a leaf
//! defined in both the prioritized and the deprioritized container is
//! emitted once, with the other copy recorded as its shadow.

use std::collections::{BTreeMap, BTreeSet};

use canopy_schema::SchemaNode;
use tracing::trace;

use crate::{CompileError, CompressionPolicy, naming::strip_prefix, policy};

/// Fields computed for one directory.
#[derive(Debug, Default)]
pub struct Extraction<'a> {
    /// Field name to the node backing it.
    pub direct: BTreeMap<String, &'a SchemaNode>,
    /// Field name to the duplicate suppressed by compression.
    pub shadow: BTreeMap<String, &'a SchemaNode>,
    pub errors: Vec<CompileError>,
}

impl<'a> Extraction<'a> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.shadow.is_empty()
    }

    /// Direct fields that open a child directory.
    pub fn child_directories(&self) -> impl Iterator<Item = &'a SchemaNode> + '_ {
        self.direct.values().copied().filter(|n| n.is_directory())
    }
}

/// Compute the fields of `node` under `policy`.
///
/// Errors are accumulated; the maps hold whatever could be extracted.
pub fn extract(node: &SchemaNode, policy: CompressionPolicy) -> Extraction<'_> {
    let mut extractor = Extractor {
        parent: node,
        policy,
        prioritized: BTreeSet::new(),
        out: Extraction::default(),
    };

    if policy.state_excluded() && !node.is_config() {
        trace!(path = node.schema_path(), "skipping read-only node");
        return extractor.out;
    }

    if policy.compress_enabled() {
        extractor.compressed();
    } else {
        extractor.uncompressed();
    }
    extractor.out
}

struct Extractor<'a> {
    parent: &'a SchemaNode,
    policy: CompressionPolicy,
    /// Names added from the prioritized container.
    prioritized: BTreeSet<String>,
    out: Extraction<'a>,
}

impl<'a> Extractor<'a> {
    fn excluded(&self, node: &SchemaNode) -> bool {
        self.policy.state_excluded() && !node.is_config()
    }

    fn uncompressed(&mut self) {
        for child in self.parent.children.values() {
            if child.is_choice_or_case() {
                for promoted in promoted_descendants(child) {
                    if !self.excluded(promoted) {
                        self.add(promoted);
                    }
                }
            } else if !self.excluded(child) {
                self.add(child);
            }
        }
    }

    fn compressed(&mut self) {
        let prioritized = self.policy.prioritized_container();
        let first = self
            .parent
            .child(prioritized)
            .filter(|c| is_config_state_container(c));

        let ordered = first.into_iter().chain(
            self.parent
                .children
                .values()
                .filter(|c| !first.is_some_and(|f| std::ptr::eq(f, *c))),
        );

        for child in ordered {
            if self.excluded(child) {
                continue;
            }

            if is_config_state_container(child) {
                self.merge_container(child, child.name == prioritized);
                continue;
            }

            if is_key_placeholder(self.parent, child) {
                trace!(path = child.schema_path(), "skipping list key placeholder");
                continue;
            }

            if child.is_choice_or_case() {
                for promoted in promoted_descendants(child) {
                    if !self.excluded(promoted) {
                        self.add(promoted);
                    }
                }
                continue;
            }

            if let Some(list) = surrounded_list(child) {
                if !self.excluded(list) {
                    self.add(list);
                }
                continue;
            }

            self.add(child);
        }
    }

    /// Flatten a `config` or `state` container into the parent.
    fn merge_container(&mut self, container: &'a SchemaNode, prioritized: bool) {
        for child in container.children.values() {
            if self.excluded(child) {
                continue;
            }
            let candidates = if child.is_choice_or_case() {
                promoted_descendants(child)
            } else {
                vec![child]
            };
            for candidate in candidates {
                if self.excluded(candidate) {
                    continue;
                }
                if prioritized {
                    if self.add(candidate) {
                        self.prioritized.insert(candidate.name.clone());
                    }
                } else {
                    self.add_deprioritized(candidate);
                }
            }
        }
    }

    fn add_deprioritized(&mut self, node: &'a SchemaNode) {
        if self.prioritized.contains(&node.name) {
            self.out.shadow.insert(node.name.clone(), node);
            return;
        }
        if self.policy.state_excluded() {
            return;
        }
        self.add(node);
    }

    /// Add a direct field; a name clash is recorded as an error.
    fn add(&mut self, node: &'a SchemaNode) -> bool {
        if self.out.direct.contains_key(&node.name) {
            self.out.errors.push(CompileError::DuplicateField {
                parent: self.parent.schema_path().to_string(),
                name: node.name.clone(),
            });
            return false;
        }
        self.out.direct.insert(node.name.clone(), node);
        true
    }
}

fn is_config_state_container(node: &SchemaNode) -> bool {
    node.is_container()
        && (node.name == policy::CONFIG_CONTAINER || node.name == policy::STATE_CONTAINER)
}

/// A direct key leaf of a list that references the real key inside the
/// list's `config` or `state` container.
fn is_key_placeholder(list: &SchemaNode, child: &SchemaNode) -> bool {
    if !list.is_list() || child.kind != canopy_schema::NodeKind::Leaf {
        return false;
    }
    if !list.keys.iter().any(|k| *k == child.name) {
        return false;
    }
    let Some(path) = child.ty.as_ref().and_then(|ty| ty.leafref_path()) else {
        return false;
    };

    let mut segments = path.rsplit('/').map(strip_prefix);
    let (Some(target), Some(container)) = (segments.next(), segments.next()) else {
        return false;
    };
    target == child.name
        && list
            .child(container)
            .is_some_and(is_config_state_container)
}

/// The list inside a container whose only child is that list.
fn surrounded_list(node: &SchemaNode) -> Option<&SchemaNode> {
    if !node.is_container() || node.children.len() != 1 {
        return None;
    }
    node.children.values().next().filter(|c| c.is_list())
}

/// First descendants of a choice or case that are neither.
fn promoted_descendants(node: &SchemaNode) -> Vec<&SchemaNode> {
    let mut out = Vec::new();
    collect_promoted(node, &mut out);
    out
}

fn collect_promoted<'a>(node: &'a SchemaNode, out: &mut Vec<&'a SchemaNode>) {
    for child in node.children.values() {
        if child.is_choice_or_case() {
            collect_promoted(child, out);
        } else {
            out.push(child);
        }
    }
}
