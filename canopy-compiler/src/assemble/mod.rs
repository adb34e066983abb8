//! IR assembly.
//!
//! Walks each module's compressed tree, turns every container and list
//! that survives extraction into a [`Directory`], binds leaf types against
//! the enum catalog and assigns unique names.

mod bind;
mod enums;
mod leafref;

use std::collections::{BTreeMap, HashMap, HashSet};

use canopy_ir::{
    Directory, DirectoryKind, FieldDetails, FieldKind, Ir, IrMeta, KeyDetails, ModuleMeta,
};
use canopy_schema::{Module, ModuleSet, NodeKind, SchemaNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::{enums::EnumCatalog, leafref::LeafIndex};
use crate::{
    CompileError, CompressionPolicy,
    extract::{Extraction, extract},
    naming::{NameRegistry, to_pascal_case},
};

/// Name of the synthetic root directory when none is configured.
pub const DEFAULT_FAKE_ROOT: &str = "Device";

/// Options that shape the IR independently of the compression policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrOptions {
    /// Name of a synthetic root directory holding every module's top-level
    /// nodes, or `None` to emit no root.
    pub fake_root: Option<String>,
    /// Give every enumerated leaf its own catalog entry (identities stay
    /// shared).
    pub skip_enum_dedup: bool,
    /// Omit shadow paths from fields.
    pub ignore_shadow_paths: bool,
    /// Modules to leave out of the IR.
    pub exclude_modules: Vec<String>,
}

/// Build the IR for `modules` under `policy`.
///
/// Leafrefs are expected to have been retargeted already when the policy
/// prefers operational state. Errors are returned next to the IR that
/// could be built: a directory whose extraction fails or whose list keys
/// are missing is left out along with its subtree and the field that led
/// to it. The subtree is still checked, so every error surfaces in one run.
pub fn build_ir(
    modules: &ModuleSet,
    policy: CompressionPolicy,
    options: &IrOptions,
) -> (Ir, Vec<CompileError>) {
    let modules: Vec<&Module> = modules
        .sorted()
        .into_iter()
        .filter(|m| !options.exclude_modules.contains(&m.name))
        .collect();

    let mut assembler = Assembler {
        policy,
        options,
        leaves: LeafIndex::build(&modules),
        enums: EnumCatalog::default(),
        directories: BTreeMap::new(),
        hints: HashMap::new(),
        dropped: HashSet::new(),
        errors: Vec::new(),
        module: String::new(),
    };

    let mut root_fields = BTreeMap::new();
    for &module in &modules {
        assembler.module.clone_from(&module.name);
        debug!(module = %module.name, %policy, "assembling module");

        let top = extract(module.root(), policy);
        if !top.is_ok() {
            assembler.errors.extend(top.errors);
            continue;
        }

        if options.fake_root.is_some() {
            assembler.collect_root_fields(module.root(), &top, &mut root_fields);
        }

        let parent = options.fake_root.as_ref().map(|_| "/");
        for child in top.child_directories() {
            assembler.visit(child, parent);
        }
    }

    if let Some(name) = &options.fake_root {
        assembler.directories.insert(
            "/".to_string(),
            Directory {
                name: name.clone(),
                path: "/".to_string(),
                kind: DirectoryKind::Container,
                module: String::new(),
                parent: None,
                config: true,
                fields: root_fields,
                list_keys: IndexMap::new(),
                list_key_collision: None,
                is_fake_root: true,
                description: None,
            },
        );
    }

    let meta = IrMeta {
        policy: policy.as_str().to_string(),
        modules: modules
            .iter()
            .map(|m| ModuleMeta {
                name: m.name.clone(),
                prefix: m.prefix.clone(),
                namespace: m.namespace.clone(),
            })
            .collect(),
        fake_root: options.fake_root.clone(),
    };
    assembler.finish(meta)
}

/// Naming candidates for a directory.
struct NameHint {
    preferred: String,
    qualified: String,
}

struct Assembler<'a> {
    policy: CompressionPolicy,
    options: &'a IrOptions,
    leaves: LeafIndex<'a>,
    enums: EnumCatalog,
    directories: BTreeMap<String, Directory>,
    hints: HashMap<String, NameHint>,
    /// Paths of directories left out because of errors.
    dropped: HashSet<String>,
    errors: Vec<CompileError>,
    /// Module being assembled.
    module: String,
}

impl<'a> Assembler<'a> {
    fn collect_root_fields(
        &mut self,
        root: &'a SchemaNode,
        top: &Extraction<'a>,
        fields: &mut BTreeMap<String, FieldDetails>,
    ) {
        for (name, &node) in &top.direct {
            if fields.contains_key(name) {
                self.errors.push(CompileError::DuplicateField {
                    parent: "/".to_string(),
                    name: name.clone(),
                });
                continue;
            }
            if let Some(field) = self.field(root, node, top.shadow.get(name).copied()) {
                fields.insert(name.clone(), field);
            }
        }
    }

    fn visit(&mut self, node: &'a SchemaNode, parent: Option<&str>) {
        let extraction = extract(node, self.policy);
        let missing = missing_keys(node, &extraction);
        if !extraction.is_ok() || !missing.is_empty() {
            debug!(path = node.schema_path(), "dropping directory with errors");
            self.errors.extend(extraction.errors.iter().cloned());
            self.errors.extend(missing);
            self.dropped.insert(node.schema_path().to_string());
            self.check_subtree(&extraction);
            return;
        }

        let directory = self.directory(node, parent, &extraction);
        if self.directories.contains_key(&directory.path) {
            self.errors.push(CompileError::DuplicateField {
                parent: parent.unwrap_or("/").to_string(),
                name: node.name.clone(),
            });
            return;
        }

        let hint = self.name_hint(node, parent);
        self.hints.insert(directory.path.clone(), hint);
        self.directories.insert(directory.path.clone(), directory);

        for child in extraction.child_directories() {
            self.visit(child, Some(node.schema_path()));
        }
    }

    /// Collect the errors below a dropped directory without emitting it.
    fn check_subtree(&mut self, extraction: &Extraction<'a>) {
        for child in extraction.child_directories() {
            let nested = extract(child, self.policy);
            self.errors.extend(nested.errors.iter().cloned());
            self.errors.extend(missing_keys(child, &nested));
            self.check_subtree(&nested);
        }
    }

    /// Build the directory for `node`; its list keys must all be present.
    fn directory(
        &mut self,
        node: &'a SchemaNode,
        parent: Option<&str>,
        extraction: &Extraction<'a>,
    ) -> Directory {
        let mut fields = BTreeMap::new();
        for (name, &child) in &extraction.direct {
            let shadow = extraction.shadow.get(name).copied();
            if let Some(field) = self.field(node, child, shadow) {
                fields.insert(name.clone(), field);
            }
        }

        let mut list_keys = IndexMap::new();
        for key in &node.keys {
            if let Some(field) = fields.remove(key) {
                list_keys.insert(
                    key.clone(),
                    KeyDetails {
                        name: key.clone(),
                        field,
                    },
                );
            }
        }

        let kind = if node.is_list() {
            DirectoryKind::List
        } else {
            DirectoryKind::Container
        };
        Directory {
            name: String::new(),
            path: node.schema_path().to_string(),
            kind,
            module: self.module.clone(),
            parent: parent.map(str::to_string),
            config: node.is_config(),
            fields,
            list_keys,
            list_key_collision: node.keys.iter().find(|k| **k == node.name).cloned(),
            is_fake_root: false,
            description: node.description.clone(),
        }
    }

    fn field(
        &mut self,
        directory: &SchemaNode,
        node: &'a SchemaNode,
        shadow: Option<&'a SchemaNode>,
    ) -> Option<FieldDetails> {
        let Some(kind) = field_kind(node.kind) else {
            debug!(path = node.schema_path(), "no field for choice or case node");
            return None;
        };
        let shadow = shadow.filter(|_| !self.options.ignore_shadow_paths);
        let base = directory.data_path();

        Some(FieldDetails {
            name: node.name.clone(),
            source_path: node.schema_path().to_string(),
            shadow_source_path: shadow.map(|s| s.schema_path().to_string()),
            data_path: relative_path(base, node.data_path()),
            shadow_data_path: shadow.map(|s| relative_path(base, s.data_path())),
            kind,
            config: node.is_config(),
            type_binding: node.ty.as_ref().map(|ty| self.bind(node, ty)),
            description: node.description.clone(),
        })
    }

    fn name_hint(&self, node: &SchemaNode, parent: Option<&str>) -> NameHint {
        let module = to_pascal_case(&self.module);
        if !self.policy.compress_enabled() {
            let mut parts = vec![module];
            parts.extend(
                node.data_path()
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(to_pascal_case),
            );
            let name = parts.join("_");
            return NameHint {
                preferred: name.clone(),
                qualified: name,
            };
        }

        let preferred = to_pascal_case(&node.name);
        let qualifier = parent
            .and_then(|p| p.rsplit('/').find(|s| !s.is_empty()))
            .map_or(module, to_pascal_case);
        NameHint {
            qualified: format!("{}_{}", qualifier, preferred),
            preferred,
        }
    }

    /// Assign directory names and freeze the enum catalog.
    fn finish(mut self, meta: IrMeta) -> (Ir, Vec<CompileError>) {
        for directory in self.directories.values_mut() {
            directory
                .fields
                .retain(|_, f| !(f.kind.is_directory() && self.dropped.contains(&f.source_path)));
        }

        let mut names = NameRegistry::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for hint in self.hints.values() {
            *counts.entry(hint.preferred.as_str()).or_default() += 1;
        }

        if let Some(root) = self.directories.values().find(|d| d.is_fake_root) {
            names.claim(&root.name);
        }
        for (path, directory) in &mut self.directories {
            let Some(hint) = self.hints.get(path) else {
                continue;
            };
            let candidate = if counts.get(hint.preferred.as_str()).copied().unwrap_or(0) > 1 {
                &hint.qualified
            } else {
                &hint.preferred
            };
            directory.name = names.claim(candidate);
        }

        // A broken leafref is reported once even when several fields reach it.
        let mut seen = HashSet::new();
        self.errors.retain(|e| seen.insert(e.clone()));

        let ir = Ir {
            meta,
            directories: self.directories,
            enums: self.enums.finish(),
        };
        (ir, self.errors)
    }
}

/// List keys of `node` that extraction did not turn into fields.
fn missing_keys(node: &SchemaNode, extraction: &Extraction<'_>) -> Vec<CompileError> {
    node.keys
        .iter()
        .filter(|key| !extraction.direct.contains_key(*key))
        .map(|key| CompileError::MissingListKey {
            path: node.schema_path().to_string(),
            key: key.clone(),
        })
        .collect()
}

fn field_kind(kind: NodeKind) -> Option<FieldKind> {
    match kind {
        NodeKind::Leaf => Some(FieldKind::Leaf),
        NodeKind::LeafList => Some(FieldKind::LeafList),
        NodeKind::Container => Some(FieldKind::Container),
        NodeKind::List => Some(FieldKind::List),
        NodeKind::AnyData => Some(FieldKind::AnyData),
        NodeKind::Choice | NodeKind::Case => None,
    }
}

/// `full` relative to the directory at `base` (e.g. `config/name`).
fn relative_path(base: &str, full: &str) -> String {
    let rest = if base == "/" {
        full.strip_prefix('/')
    } else {
        full.strip_prefix(base).and_then(|r| r.strip_prefix('/'))
    };
    rest.unwrap_or(full).to_string()
}
