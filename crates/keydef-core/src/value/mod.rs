mod compare;

#[cfg(test)]
mod tests;

use crate::codec::{self, CodecError, decode, decode_exact, read_array_len, read_header};
use keydef_primitives::ValueKind;
use rust_decimal::Decimal;
use uuid::Uuid;

// re-exports
pub(crate) use compare::compare_with_strategy;

///
/// Datetime
///
/// Point in time carried by the datetime extension type.
/// Ordering uses only the instant; timezone fields are informational.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Datetime {
    pub epoch: i64,
    pub nsec: i32,
    pub tzoffset: i16,
    pub tzindex: i16,
}

impl Datetime {
    #[must_use]
    pub const fn from_epoch(epoch: i64) -> Self {
        Self {
            epoch,
            nsec: 0,
            tzoffset: 0,
            tzindex: 0,
        }
    }

    #[must_use]
    pub const fn new(epoch: i64, nsec: i32) -> Self {
        Self {
            epoch,
            nsec,
            tzoffset: 0,
            tzindex: 0,
        }
    }

    /// (seconds, nanoseconds) pair used for ordering.
    #[must_use]
    pub const fn instant(&self) -> (i64, i32) {
        (self.epoch, self.nsec)
    }
}

///
/// ValueRef
///
/// One decoded field borrowed from a tuple or key buffer.
/// Containers stay encoded; only their raw bytes are kept.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
    Nil,
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f32),
    Double(f64),
    Str(&'a [u8]),
    Bin(&'a [u8]),
    Decimal(Decimal),
    Uuid(Uuid),
    Datetime(Datetime),
    Ext { type_id: i8, data: &'a [u8] },
    Array(&'a [u8]),
    Map(&'a [u8]),
}

impl ValueRef<'_> {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Bool(_) => ValueKind::Bool,
            Self::Uint(_) => ValueKind::Uint,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Str(_) => ValueKind::Str,
            Self::Bin(_) => ValueKind::Bin,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Datetime(_) => ValueKind::Datetime,
            Self::Ext { .. } => ValueKind::Ext,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
        }
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Copy into an owned value, decoding nested containers.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        let value = match *self {
            Self::Nil => Value::Nil,
            Self::Bool(v) => Value::Bool(v),
            Self::Uint(v) => Value::Uint(v),
            Self::Int(v) => Value::Int(v),
            Self::Float(v) => Value::Float(v),
            Self::Double(v) => Value::Double(v),
            Self::Str(v) => Value::Str(String::from_utf8_lossy(v).into_owned()),
            Self::Bin(v) => Value::Bin(v.to_vec()),
            Self::Decimal(v) => Value::Decimal(v),
            Self::Uuid(v) => Value::Uuid(v),
            Self::Datetime(v) => Value::Datetime(v),
            Self::Ext { type_id, data } => Value::Ext {
                type_id,
                data: data.to_vec(),
            },
            Self::Array(raw) => {
                let mut buf = raw;
                let len = read_array_len(&mut buf)?;
                let mut items = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    items.push(decode(&mut buf)?.to_value()?);
                }
                Value::Array(items)
            }
            Self::Map(raw) => {
                let mut buf = raw;
                let len = match read_header(&mut buf)? {
                    codec::Header::Map(len) => len,
                    _ => {
                        return Err(CodecError::UnexpectedKind {
                            expected: "map",
                            found: self.kind(),
                        });
                    }
                };
                let mut entries = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    let key = decode(&mut buf)?.to_value()?;
                    let value = decode(&mut buf)?.to_value()?;
                    entries.push((key, value));
                }
                Value::Map(entries)
            }
        };

        Ok(value)
    }
}

///
/// Value
///
/// Owned MessagePack value used to build tuples and keys.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Bin(Vec<u8>),
    Decimal(Decimal),
    Uuid(Uuid),
    Datetime(Datetime),
    Ext { type_id: i8, data: Vec<u8> },
    Array(Vec<Self>),
    Map(Vec<(Self, Self)>),
}

impl Value {
    #[must_use]
    pub fn bin(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bin(bytes.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Bool(_) => ValueKind::Bool,
            Self::Uint(_) => ValueKind::Uint,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Str(_) => ValueKind::Str,
            Self::Bin(_) => ValueKind::Bin,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Datetime(_) => ValueKind::Datetime,
            Self::Ext { .. } => ValueKind::Ext,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Append the MessagePack encoding of this value.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        use rmp::encode as enc;

        match self {
            Self::Nil => enc::write_nil(out).map_err(CodecError::write)?,
            Self::Bool(v) => enc::write_bool(out, *v).map_err(CodecError::write)?,
            Self::Uint(v) => {
                enc::write_uint(out, *v).map_err(CodecError::write)?;
            }
            Self::Int(v) => {
                enc::write_sint(out, *v).map_err(CodecError::write)?;
            }
            Self::Float(v) => enc::write_f32(out, *v).map_err(CodecError::write)?,
            Self::Double(v) => enc::write_f64(out, *v).map_err(CodecError::write)?,
            Self::Str(v) => enc::write_str(out, v).map_err(CodecError::write)?,
            Self::Bin(v) => enc::write_bin(out, v).map_err(CodecError::write)?,
            Self::Decimal(v) => codec::encode_decimal(out, v)?,
            Self::Uuid(v) => codec::encode_uuid(out, v)?,
            Self::Datetime(v) => codec::encode_datetime(out, v)?,
            Self::Ext { type_id, data } => codec::write_ext(out, *type_id, data)?,
            Self::Array(items) => {
                codec::write_array_header(out, items.len())?;
                for item in items {
                    item.encode(out)?;
                }
            }
            Self::Map(entries) => {
                codec::write_map_header(out, entries.len())?;
                for (key, value) in entries {
                    key.encode(out)?;
                    value.encode(out)?;
                }
            }
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode(&mut out)?;

        Ok(out)
    }

    /// Decode exactly one value from `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_exact(bytes)?.to_value()
    }
}

///
/// Conversions
///

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Uint(u64::from(v))
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    let v = i64::from(v);
                    u64::try_from(v).map_or(Self::Int(v), Self::Uint)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<Datetime> for Value {
    fn from(v: Datetime) -> Self {
        Self::Datetime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}
