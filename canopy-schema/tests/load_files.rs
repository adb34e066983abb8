//! Loading schema trees from disk.

use std::fs;

use canopy_schema::{ConfigFlag, Error, NodeKind, SchemaFile, TypeDescriptor, load_files};

const INTERFACES_TOML: &str = r#"
[[modules]]
name = "openconfig-interfaces"
prefix = "oc-if"

[modules.children.interfaces]
kind = "container"

[modules.children.interfaces.children.interface]
kind = "list"
keys = ["name"]

[modules.children.interfaces.children.interface.children.name]
kind = "leaf"
type = { kind = "leafref", path = "../config/name" }

[modules.children.interfaces.children.interface.children.config]
kind = "container"

[modules.children.interfaces.children.interface.children.config.children.name]
kind = "leaf"
type = { kind = "string" }

[modules.children.interfaces.children.interface.children.state]
kind = "container"
config = false

[modules.children.interfaces.children.interface.children.state.children.name]
kind = "leaf"
type = { kind = "string" }
"#;

const SYSTEM_JSON: &str = r#"{
  "modules": [
    {
      "name": "openconfig-system",
      "children": {
        "system": {
          "kind": "container",
          "children": {
            "hostname": {"kind": "leaf", "type": {"kind": "string"}}
          }
        }
      }
    }
  ]
}"#;

#[test]
fn test_open_toml_schema() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("interfaces.toml");
    fs::write(&path, INTERFACES_TOML).expect("write schema");

    let file = SchemaFile::open(&path).expect("schema parses");
    let module = file.modules().get("openconfig-interfaces").expect("module");
    let list = &module.root().children["interfaces"].children["interface"];

    assert_eq!(module.prefix.as_deref(), Some("oc-if"));
    assert_eq!(list.kind, NodeKind::List);
    assert_eq!(list.keys, vec!["name".to_string()]);
    assert_eq!(
        list.children["name"].ty,
        Some(TypeDescriptor::Leafref {
            path: "../config/name".into()
        })
    );
    assert_eq!(list.children["state"].config, ConfigFlag::False);
    assert!(!list.children["state"].children["name"].is_config());
    assert_eq!(
        list.children["config"].children["name"].schema_path(),
        "/interfaces/interface/config/name"
    );
}

#[test]
fn test_load_files_merges_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let toml_path = dir.path().join("interfaces.toml");
    let json_path = dir.path().join("system.json");
    fs::write(&toml_path, INTERFACES_TOML).expect("write toml");
    fs::write(&json_path, SYSTEM_JSON).expect("write json");

    let modules = load_files(&[&json_path, &toml_path]).expect("both parse");
    let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["openconfig-system", "openconfig-interfaces"]);
}

#[test]
fn test_open_rejects_unknown_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("schema.yang");
    fs::write(&path, "module x {}").expect("write");

    let err = SchemaFile::open(&path).expect_err("unsupported");
    assert!(matches!(*err, Error::UnsupportedFormat { .. }));
}

#[test]
fn test_open_missing_file() {
    let err = SchemaFile::open("does-not-exist.json").expect_err("missing");
    assert!(matches!(*err, Error::Io { .. }));
}
