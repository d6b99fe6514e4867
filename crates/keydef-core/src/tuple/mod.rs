//! Module: tuple
//! Responsibility: immutable, reference-counted MessagePack records.
//! Does not own: key part validation (see `key_def::validate`).
//! Boundary: bytes are framing-checked once at construction; field access
//! afterwards trusts the top-level offsets.


use crate::{
    codec::{self, CodecError, Header},
    path::{self, PathError, PathToken},
    value::{Value, ValueRef},
};
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;

///
/// FieldAccessError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldAccessError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

///
/// Tuple
///
/// Cloning acquires a reference; dropping releases it.
///

#[derive(Clone, Eq, PartialEq)]
pub struct Tuple {
    data: Arc<[u8]>,

    /// Start offset of every top-level field, plus the end offset.
    offsets: Arc<[usize]>,
}

impl Tuple {
    /// Wrap an encoded MessagePack array.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Result<Self, CodecError> {
        let data = data.into();
        let offsets = codec::array_offsets(&data)?;

        Ok(Self {
            data,
            offsets: offsets.into(),
        })
    }

    /// Encode owned values into a new tuple.
    pub fn from_values(values: &[Value]) -> Result<Self, CodecError> {
        Value::Array(values.to_vec()).to_bytes().and_then(Self::new)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Raw bytes of one top-level field.
    #[must_use]
    pub fn field(&self, fieldno: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(fieldno)?;
        let end = *self.offsets.get(fieldno + 1)?;

        Some(&self.data[start..end])
    }

    /// Raw bytes of a top-level field, optionally refined by a JSON path.
    ///
    /// `Ok(None)` means the field is absent: out of range, or the path leads
    /// through a missing key or index, or through a value of the wrong kind.
    pub fn field_at(
        &self,
        fieldno: usize,
        path: Option<&str>,
    ) -> Result<Option<&[u8]>, FieldAccessError> {
        let Some(raw) = self.field(fieldno) else {
            return Ok(None);
        };

        match path {
            Some(path) => descend(raw, path),
            None => Ok(Some(raw)),
        }
    }

    /// Decode every top-level field.
    pub fn to_values(&self) -> Result<Vec<Value>, CodecError> {
        (0..self.field_count())
            .filter_map(|i| self.field(i))
            .map(|raw| codec::decode_exact(raw)?.to_value())
            .collect()
    }

    /// Number of live handles sharing this tuple's bytes.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_values() {
            Ok(values) => f.debug_tuple("Tuple").field(&values).finish(),
            Err(_) => f.debug_tuple("Tuple").field(&self.data).finish(),
        }
    }
}

impl TryFrom<Vec<Value>> for Tuple {
    type Error = CodecError;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        Value::Array(values).to_bytes().and_then(Self::new)
    }
}

fn descend<'a>(mut raw: &'a [u8], path: &str) -> Result<Option<&'a [u8]>, FieldAccessError> {
    for token in path::tokens(path) {
        match step(raw, token?)? {
            Some(inner) => raw = inner,
            None => return Ok(None),
        }
    }

    Ok(Some(raw))
}

// One level of descent; indexes address arrays and keys address maps.
fn step<'a>(raw: &'a [u8], token: PathToken<'_>) -> Result<Option<&'a [u8]>, CodecError> {
    let mut buf = raw;

    match (codec::read_header(&mut buf)?, token) {
        (Header::Array(len), PathToken::Num(index)) => {
            if index >= len as usize {
                return Ok(None);
            }
            for _ in 0..index {
                codec::skip_value(&mut buf)?;
            }
            codec::split_value(&mut buf).map(Some)
        }
        (Header::Map(len), PathToken::Str(key)) => {
            for _ in 0..len {
                let matched = matches!(
                    codec::decode(&mut buf)?,
                    ValueRef::Str(k) if k == key.as_bytes()
                );
                if matched {
                    return codec::split_value(&mut buf).map(Some);
                }
                codec::skip_value(&mut buf)?;
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}
