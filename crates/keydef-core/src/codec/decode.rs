use crate::{
    codec::{CodecError, ext},
    value::ValueRef,
};
use keydef_primitives::ValueKind;
use rmp::{
    Marker,
    decode::{RmpRead, read_marker},
};

///
/// Header
///
/// Decoded marker plus its fixed-size payload.
/// Variable-length bodies (str, bin, ext, containers) are left in the buffer.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Header {
    Nil,
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f32),
    Double(f64),
    Str(u32),
    Bin(u32),
    Array(u32),
    Map(u32),
    Ext { len: u32, type_id: i8 },
}

impl Header {
    const fn kind(self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Bool(_) => ValueKind::Bool,
            Self::Uint(_) => ValueKind::Uint,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Str(_) => ValueKind::Str,
            Self::Bin(_) => ValueKind::Bin,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
            Self::Ext { .. } => ValueKind::Ext,
        }
    }
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> Result<&'a [u8], CodecError> {
    if buf.len() < len {
        return Err(CodecError::Truncated);
    }

    let (head, tail) = buf.split_at(len);
    *buf = tail;

    Ok(head)
}

// A short read on a slice can only mean the input ended early.
fn truncated<E>(_: E) -> CodecError {
    CodecError::Truncated
}

fn read_u8(buf: &mut &[u8]) -> Result<u8, CodecError> {
    buf.read_data_u8().map_err(truncated)
}

fn read_u16(buf: &mut &[u8]) -> Result<u16, CodecError> {
    buf.read_data_u16().map_err(truncated)
}

fn read_u32(buf: &mut &[u8]) -> Result<u32, CodecError> {
    buf.read_data_u32().map_err(truncated)
}

// Non-negative signed encodings fold into `Uint`.
fn signed(value: i64) -> Header {
    u64::try_from(value).map_or(Header::Int(value), Header::Uint)
}

fn ext_header(buf: &mut &[u8], len: u32) -> Result<Header, CodecError> {
    let type_id = buf.read_data_i8().map_err(truncated)?;

    Ok(Header::Ext { len, type_id })
}

/// Read one marker and its fixed-size payload.
pub(crate) fn read_header(buf: &mut &[u8]) -> Result<Header, CodecError> {
    let marker = read_marker(buf).map_err(truncated)?;

    let header = match marker {
        Marker::FixPos(v) => Header::Uint(u64::from(v)),
        Marker::FixNeg(v) => Header::Int(i64::from(v)),
        Marker::Null => Header::Nil,
        Marker::True => Header::Bool(true),
        Marker::False => Header::Bool(false),
        Marker::U8 => Header::Uint(u64::from(read_u8(buf)?)),
        Marker::U16 => Header::Uint(u64::from(read_u16(buf)?)),
        Marker::U32 => Header::Uint(u64::from(read_u32(buf)?)),
        Marker::U64 => Header::Uint(buf.read_data_u64().map_err(truncated)?),
        Marker::I8 => signed(i64::from(buf.read_data_i8().map_err(truncated)?)),
        Marker::I16 => signed(i64::from(buf.read_data_i16().map_err(truncated)?)),
        Marker::I32 => signed(i64::from(buf.read_data_i32().map_err(truncated)?)),
        Marker::I64 => signed(buf.read_data_i64().map_err(truncated)?),
        Marker::F32 => Header::Float(buf.read_data_f32().map_err(truncated)?),
        Marker::F64 => Header::Double(buf.read_data_f64().map_err(truncated)?),
        Marker::FixStr(len) => Header::Str(u32::from(len)),
        Marker::Str8 => Header::Str(u32::from(read_u8(buf)?)),
        Marker::Str16 => Header::Str(u32::from(read_u16(buf)?)),
        Marker::Str32 => Header::Str(read_u32(buf)?),
        Marker::Bin8 => Header::Bin(u32::from(read_u8(buf)?)),
        Marker::Bin16 => Header::Bin(u32::from(read_u16(buf)?)),
        Marker::Bin32 => Header::Bin(read_u32(buf)?),
        Marker::FixArray(len) => Header::Array(u32::from(len)),
        Marker::Array16 => Header::Array(u32::from(read_u16(buf)?)),
        Marker::Array32 => Header::Array(read_u32(buf)?),
        Marker::FixMap(len) => Header::Map(u32::from(len)),
        Marker::Map16 => Header::Map(u32::from(read_u16(buf)?)),
        Marker::Map32 => Header::Map(read_u32(buf)?),
        Marker::FixExt1 => ext_header(buf, 1)?,
        Marker::FixExt2 => ext_header(buf, 2)?,
        Marker::FixExt4 => ext_header(buf, 4)?,
        Marker::FixExt8 => ext_header(buf, 8)?,
        Marker::FixExt16 => ext_header(buf, 16)?,
        Marker::Ext8 => {
            let len = u32::from(read_u8(buf)?);
            ext_header(buf, len)?
        }
        Marker::Ext16 => {
            let len = u32::from(read_u16(buf)?);
            ext_header(buf, len)?
        }
        Marker::Ext32 => {
            let len = read_u32(buf)?;
            ext_header(buf, len)?
        }
        Marker::Reserved => return Err(CodecError::ReservedMarker),
    };

    Ok(header)
}

/// Advance past one complete value, containers included.
///
/// Iterative so that deeply nested input cannot exhaust the stack.
pub(crate) fn skip_value(buf: &mut &[u8]) -> Result<(), CodecError> {
    let mut pending: u64 = 1;

    while pending > 0 {
        pending -= 1;
        match read_header(buf)? {
            Header::Str(len) | Header::Bin(len) | Header::Ext { len, .. } => {
                take(buf, len as usize)?;
            }
            Header::Array(len) => pending += u64::from(len),
            Header::Map(len) => pending += 2 * u64::from(len),
            _ => {}
        }
    }

    Ok(())
}

/// Split off the raw bytes of one complete value.
pub(crate) fn split_value<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], CodecError> {
    let start = *buf;
    skip_value(buf)?;

    Ok(&start[..start.len() - buf.len()])
}

/// Read an array header, rejecting any other kind.
pub(crate) fn read_array_len(buf: &mut &[u8]) -> Result<u32, CodecError> {
    match read_header(buf)? {
        Header::Array(len) => Ok(len),
        other => Err(CodecError::UnexpectedKind {
            expected: "array",
            found: other.kind(),
        }),
    }
}

/// Validate a complete top-level array and return the byte offset of
/// every element plus the end offset.
pub(crate) fn array_offsets(data: &[u8]) -> Result<Vec<usize>, CodecError> {
    let mut buf = data;
    let len = read_array_len(&mut buf)?;

    // every element takes at least one byte
    let mut offsets = Vec::with_capacity((len as usize).min(buf.len()) + 1);
    for _ in 0..len {
        offsets.push(data.len() - buf.len());
        skip_value(&mut buf)?;
    }
    offsets.push(data.len() - buf.len());

    if !buf.is_empty() {
        return Err(CodecError::TrailingBytes);
    }

    Ok(offsets)
}

/// Decode one value, borrowing string and binary payloads.
pub(crate) fn decode<'a>(buf: &mut &'a [u8]) -> Result<ValueRef<'a>, CodecError> {
    let start = *buf;

    let value = match read_header(buf)? {
        Header::Nil => ValueRef::Nil,
        Header::Bool(v) => ValueRef::Bool(v),
        Header::Uint(v) => ValueRef::Uint(v),
        Header::Int(v) => ValueRef::Int(v),
        Header::Float(v) => ValueRef::Float(v),
        Header::Double(v) => ValueRef::Double(v),
        Header::Str(len) => ValueRef::Str(take(buf, len as usize)?),
        Header::Bin(len) => ValueRef::Bin(take(buf, len as usize)?),
        Header::Ext { len, type_id } => ext::decode_ext(type_id, take(buf, len as usize)?)?,
        Header::Array(_) => {
            *buf = start;
            ValueRef::Array(split_value(buf)?)
        }
        Header::Map(_) => {
            *buf = start;
            ValueRef::Map(split_value(buf)?)
        }
    };

    Ok(value)
}

/// Decode exactly one value spanning all of `raw`.
pub(crate) fn decode_exact(raw: &[u8]) -> Result<ValueRef<'_>, CodecError> {
    let mut buf = raw;
    let value = decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(CodecError::TrailingBytes);
    }

    Ok(value)
}
