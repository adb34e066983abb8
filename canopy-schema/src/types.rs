//! Leaf type descriptors.

use serde::{Deserialize, Serialize};

/// The type of a leaf or leaf-list.
///
/// Builtin types are unit variants. Named derived types wrap their base in
/// [`TypeDescriptor::Typedef`], whose `name` is the defining location
/// (`module:typedef`) used to deduplicate enumerated types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeDescriptor {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Binary,
    Empty,
    Bits,
    InstanceIdentifier,
    /// Inline enumeration with its value names in declaration order.
    Enumeration { values: Vec<String> },
    /// Reference to an identity derived from `base`.
    Identityref {
        base: String,
        #[serde(default)]
        values: Vec<String>,
    },
    /// Cross-reference to another leaf's value.
    Leafref { path: String },
    /// Union of member types.
    Union { types: Vec<TypeDescriptor> },
    /// Named derived type.
    Typedef {
        name: String,
        base: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Name of the builtin type, or `None` for constructed types.
    pub fn builtin_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Decimal64 => "decimal64",
            Self::Binary => "binary",
            Self::Empty => "empty",
            Self::Bits => "bits",
            Self::InstanceIdentifier => "instance-identifier",
            Self::Enumeration { .. }
            | Self::Identityref { .. }
            | Self::Leafref { .. }
            | Self::Union { .. }
            | Self::Typedef { .. } => return None,
        };
        Some(name)
    }

    /// Strip typedef wrappers, returning the base type and the innermost
    /// typedef name that wrapped it.
    pub fn resolve(&self) -> (&TypeDescriptor, Option<&str>) {
        let mut current = self;
        let mut typedef = None;
        while let Self::Typedef { name, base } = current {
            typedef = Some(name.as_str());
            current = base;
        }
        (current, typedef)
    }

    /// The path expression if this type (after typedefs) is a leafref.
    pub fn leafref_path(&self) -> Option<&str> {
        match self.resolve().0 {
            Self::Leafref { path } => Some(path),
            _ => None,
        }
    }

    /// Returns true if the type, after typedefs, is a leafref.
    pub fn is_leafref(&self) -> bool {
        self.leafref_path().is_some()
    }

    /// Returns true if the type is, or contains through unions, an
    /// enumeration or identityref.
    pub fn is_enumerated(&self) -> bool {
        match self.resolve().0 {
            Self::Enumeration { .. } | Self::Identityref { .. } => true,
            Self::Union { types } => types.iter().any(TypeDescriptor::is_enumerated),
            _ => false,
        }
    }
}
