use crate::collation::Collation;
use keydef_primitives::{CompareStrategy, FieldType, ValueKind};
use std::fmt;

///
/// PartType
///
/// Declared part type. Names outside the registry are kept verbatim and
/// ordered with scalar semantics.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartType {
    Known(FieldType),
    Unknown(String),
}

impl PartType {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        FieldType::from_name(name).map_or_else(|| Self::Unknown(name.to_string()), Self::Known)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Known(ty) => ty.name(),
            Self::Unknown(name) => name,
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> CompareStrategy {
        match self {
            Self::Known(ty) => ty.strategy(),
            Self::Unknown(_) => CompareStrategy::Scalar,
        }
    }

    /// Whether a stored value kind satisfies this type. Unknown types accept
    /// every non-nil kind.
    #[must_use]
    pub const fn accepts(&self, kind: ValueKind) -> bool {
        match self {
            Self::Known(ty) => ty.accepts(kind),
            Self::Unknown(_) => !matches!(kind, ValueKind::Nil),
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// KeyPart
///
/// One compiled key part. `fieldno` is zero-based.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPart {
    pub(crate) fieldno: u32,
    pub(crate) field_type: PartType,
    pub(crate) is_nullable: bool,
    pub(crate) collation: Option<Collation>,
    pub(crate) path: Option<String>,
}

impl KeyPart {
    #[must_use]
    pub const fn fieldno(&self) -> u32 {
        self.fieldno
    }

    #[must_use]
    pub const fn field_type(&self) -> &PartType {
        &self.field_type
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    #[must_use]
    pub const fn collation(&self) -> Option<&Collation> {
        self.collation.as_ref()
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(crate) const fn field_index(&self) -> usize {
        self.fieldno as usize
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.fieldno + 1)?;
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        write!(f, " {}", self.field_type)?;
        if self.is_nullable {
            f.write_str(" nullable")?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " collate {collation}")?;
        }

        Ok(())
    }
}
