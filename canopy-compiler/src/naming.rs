//! Naming rules for generated directories and enumerated types.

use std::collections::HashSet;

/// Convert a schema identifier to UpperCamelCase
/// (e.g. "admin-status" -> "AdminStatus", "ipv4_addr" -> "Ipv4Addr").
///
/// `-`, `_` and `.` separate words; the first character of each word is
/// uppercased and the rest is kept.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_', '.'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Name for a qualified schema identifier (`module:name`), as
/// `Module_Name`. Unqualified identifiers become `Name`.
pub fn qualified_name(identifier: &str) -> String {
    match identifier.split_once(':') {
        Some((module, name)) => format!("{}_{}", to_pascal_case(module), to_pascal_case(name)),
        None => to_pascal_case(identifier),
    }
}

/// Strip a `prefix:` qualifier from a path segment.
pub fn strip_prefix(segment: &str) -> &str {
    segment.split_once(':').map_or(segment, |(_, name)| name)
}

/// Hands out unique names, disambiguating repeats with a numeric suffix.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name, returning the first free variant of it
    /// (`Name`, `Name2`, `Name3`, ...).
    pub fn claim(&mut self, preferred: &str) -> String {
        if self.used.insert(preferred.to_string()) {
            return preferred.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", preferred, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}
