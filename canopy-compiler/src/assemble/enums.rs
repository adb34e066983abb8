//! The enumerated type catalog.

use std::collections::BTreeMap;

use canopy_ir::{EnumCatalogEntry, EnumKind};

use crate::naming::NameRegistry;

struct Pending {
    kind: EnumKind,
    values: Vec<String>,
    preferred_name: String,
    defining_module: Option<String>,
}

/// Catalog under construction. Names are assigned in key order by
/// [`EnumCatalog::finish`] so they do not depend on traversal order.
#[derive(Default)]
pub(crate) struct EnumCatalog {
    entries: BTreeMap<String, Pending>,
}

impl EnumCatalog {
    /// Register an enumerated type, returning the key it is stored under.
    ///
    /// A key already registered with the same kind is shared. A key
    /// registered with another kind is disambiguated by appending the kind.
    pub fn insert(
        &mut self,
        key: String,
        kind: EnumKind,
        values: &[String],
        preferred_name: String,
        defining_module: Option<String>,
    ) -> String {
        match self.entries.get(&key) {
            Some(existing) if existing.kind == kind => key,
            Some(_) => {
                let key = format!("{}#{}", key, kind.as_str());
                self.insert(key, kind, values, preferred_name, defining_module)
            }
            None => {
                self.entries.insert(
                    key.clone(),
                    Pending {
                        kind,
                        values: values.to_vec(),
                        preferred_name,
                        defining_module,
                    },
                );
                key
            }
        }
    }

    pub fn finish(self) -> BTreeMap<String, EnumCatalogEntry> {
        let mut names = NameRegistry::new();
        self.entries
            .into_iter()
            .map(|(key, pending)| {
                let entry = EnumCatalogEntry {
                    key: key.clone(),
                    name: names.claim(&pending.preferred_name),
                    kind: pending.kind,
                    values: pending.values,
                    defining_module: pending.defining_module,
                };
                (key, entry)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_same_key_shared() {
        let mut catalog = EnumCatalog::default();
        let a = catalog.insert(
            "types:status".into(),
            EnumKind::DerivedEnumeration,
            &values(&["UP", "DOWN"]),
            "Types_Status".into(),
            Some("types".into()),
        );
        let b = catalog.insert(
            "types:status".into(),
            EnumKind::DerivedEnumeration,
            &values(&["UP", "DOWN"]),
            "Types_Status".into(),
            Some("types".into()),
        );
        assert_eq!(a, b);
        assert_eq!(catalog.finish().len(), 1);
    }

    #[test]
    fn test_kind_clash_disambiguated() {
        let mut catalog = EnumCatalog::default();
        catalog.insert(
            "t:family".into(),
            EnumKind::DerivedEnumeration,
            &values(&["V4"]),
            "T_Family".into(),
            None,
        );
        let key = catalog.insert(
            "t:family".into(),
            EnumKind::Identity,
            &values(&["IPV4"]),
            "T_Family".into(),
            None,
        );
        assert_eq!(key, "t:family#identity");

        let entries = catalog.finish();
        assert_eq!(entries["t:family"].name, "T_Family");
        assert_eq!(entries["t:family#identity"].name, "T_Family2");
    }
}
