//! Field-type vocabulary shared by the key definition engine.
//!
//! This crate owns only names and capability metadata. Decoding, ordering
//! and validation live in `keydef-core`.

#[macro_use]
mod macros;


use std::fmt;

///
/// CONSTANTS
///

/// Field type names that have no comparator and are rejected by the compiler.
///
/// The check is a blacklist: any name not listed here is reported as
/// supported, including names this crate does not recognize.
pub const UNSUPPORTED_TYPE_NAMES: [&str; 4] = [
    "any", "array", "map", "*", // alias for 'any'
];

/// Legacy field type aliases still accepted by schema producers.
const TYPE_NAME_ALIASES: [(&str, FieldType); 3] = [
    ("*", FieldType::Any),
    ("num", FieldType::Unsigned),
    ("str", FieldType::String),
];

/// Ordered list of all field types in registry order.
pub const ALL_FIELD_TYPES: [FieldType; 14] = field_type_registry!(all_types_from_registry);

/// Whether a field type name can be used in a key part.
#[must_use]
pub fn is_supported_type_name(name: &str) -> bool {
    UNSUPPORTED_TYPE_NAMES
        .iter()
        .all(|unsupported| !unsupported.eq_ignore_ascii_case(name))
}

///
/// FieldType
///
/// Declared type of one key part.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldType {
    Any,
    Unsigned,
    String,
    Number,
    Double,
    Integer,
    Boolean,
    Varbinary,
    Scalar,
    Decimal,
    Uuid,
    Datetime,
    Array,
    Map,
}

impl FieldType {
    /// Resolve a canonical type name or one of its legacy aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some((_, ty)) = TYPE_NAME_ALIASES.iter().find(|(alias, _)| *alias == name) {
            return Some(*ty);
        }

        field_type_registry!(from_name_from_registry, name)
    }

    /// Return the full metadata descriptor for one field type.
    #[must_use]
    pub const fn metadata(self) -> FieldTypeMetadata {
        field_type_registry!(metadata_from_registry, self)
    }

    /// Canonical type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.metadata().name
    }

    /// Return the ordering strategy used by comparators.
    #[must_use]
    pub const fn strategy(self) -> CompareStrategy {
        self.metadata().strategy
    }

    /// Return whether values of this type have a defined ordering.
    #[must_use]
    pub const fn is_comparable(self) -> bool {
        self.metadata().is_comparable
    }

    /// Return whether a decoded value kind may be stored in a field of this type.
    ///
    /// `Nil` is never accepted here; nullability is a property of the key part.
    #[must_use]
    pub const fn accepts(self, kind: ValueKind) -> bool {
        if matches!(kind, ValueKind::Nil) {
            return false;
        }

        field_type_registry!(accepts_from_registry, self, kind)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// FieldTypeMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldTypeMetadata {
    pub name: &'static str,
    pub strategy: CompareStrategy,
    pub is_comparable: bool,
}

///
/// CompareStrategy
///
/// Per-type ordering routine selected once at compile time.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareStrategy {
    Numeric,
    Text,
    Bool,
    Binary,
    Uuid,
    Datetime,
    Scalar,
}

///
/// ValueKind
///
/// Decoded kind of one MessagePack value, after extension types are resolved.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Nil,
    Bool,
    Uint,
    Int,
    Float,
    Double,
    Str,
    Bin,
    Decimal,
    Uuid,
    Datetime,
    Ext,
    Array,
    Map,
}

impl ValueKind {
    /// Human-readable label used in type mismatch diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "boolean",
            Self::Uint => "unsigned",
            Self::Int => "integer",
            Self::Float | Self::Double => "double",
            Self::Str => "string",
            Self::Bin => "varbinary",
            Self::Decimal => "decimal",
            Self::Uuid => "uuid",
            Self::Datetime => "datetime",
            Self::Ext => "extension",
            Self::Array => "array",
            Self::Map => "map",
        }
    }

    #[must_use]
    pub const fn class(self) -> ValueClass {
        match self {
            Self::Nil => ValueClass::Nil,
            Self::Bool => ValueClass::Bool,
            Self::Uint | Self::Int | Self::Float | Self::Double | Self::Decimal => {
                ValueClass::Number
            }
            Self::Str => ValueClass::Str,
            Self::Bin => ValueClass::Bin,
            Self::Uuid => ValueClass::Uuid,
            Self::Datetime => ValueClass::Datetime,
            Self::Ext => ValueClass::Ext,
            Self::Array => ValueClass::Array,
            Self::Map => ValueClass::Map,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// ValueClass
///
/// Cross-kind rank used by `scalar` ordering.
///
/// IMPORTANT:
/// Class order is part of the on-disk sort order of scalar indexes and must
/// not be reordered.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueClass {
    Nil,
    Bool,
    Number,
    Str,
    Bin,
    Uuid,
    Datetime,
    Ext,
    Array,
    Map,
}
