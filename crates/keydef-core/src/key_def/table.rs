use crate::{
    codec::CodecError,
    error::{ErrorOrigin, KeyDefError},
    key_def::{KeyDef, KeyPart},
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::ops::Not;

///
/// PartSpec
///
/// Raw key part description in the interchange table shape.
/// Field numbers are one-based; `field` is an alias of `fieldno`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PartSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldno: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<u32>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PartSpec {
    /// Part addressed by canonical one-based `fieldno`.
    #[must_use]
    pub fn fieldno(fieldno: u32, field_type: impl Into<String>) -> Self {
        Self {
            fieldno: Some(fieldno),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    /// Part addressed by the `field` alias.
    #[must_use]
    pub fn field(field: u32, field_type: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&KeyPart> for PartSpec {
    fn from(part: &KeyPart) -> Self {
        Self {
            fieldno: Some(part.fieldno + 1),
            field: None,
            field_type: Some(part.field_type.name().to_string()),
            is_nullable: part.is_nullable,
            collation: part.collation.as_ref().map(|c| c.name().to_string()),
            path: part.path.clone(),
        }
    }
}

///
/// KeyDefTable
///
/// Ordered part list, as produced by `KeyDef::to_table` and accepted by
/// `KeyDef::new`.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyDefTable(#[into_iterator(owned, ref)] Vec<PartSpec>);

impl KeyDefTable {
    #[must_use]
    pub const fn from_vec(parts: Vec<PartSpec>) -> Self {
        Self(parts)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<PartSpec> {
        self.0
    }

    /// Encode as a MessagePack array of maps.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, KeyDefError> {
        rmp_serde::to_vec_named(self)
            .map_err(|err| KeyDefError::codec(ErrorOrigin::Codec, CodecError::write(err)))
    }

    /// Decode a MessagePack array of maps.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, KeyDefError> {
        rmp_serde::from_slice(bytes).map_err(|err| {
            KeyDefError::malformed_input(
                ErrorOrigin::Codec,
                format!("Invalid key part table: {err}"),
            )
        })
    }

    /// Compile the table into a key definition.
    pub fn compile(&self) -> Result<KeyDef, KeyDefError> {
        KeyDef::new(&self.0)
    }
}

impl From<Vec<PartSpec>> for KeyDefTable {
    fn from(parts: Vec<PartSpec>) -> Self {
        Self(parts)
    }
}

impl FromIterator<PartSpec> for KeyDefTable {
    fn from_iter<I: IntoIterator<Item = PartSpec>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
