use crate::{
    codec::{
        CodecError,
        decode::{Header, read_header},
    },
    value::{Datetime, ValueRef},
};
use rust_decimal::Decimal;
use uuid::Uuid;

///
/// CONSTANTS
///

pub const EXT_DECIMAL: i8 = 1;
pub const EXT_UUID: i8 = 2;
pub const EXT_DATETIME: i8 = 4;

const DECIMAL_MAX_SCALE: i64 = 28;
const DECIMAL_MAX_DIGITS: i64 = 38;
const DATETIME_SHORT_LEN: usize = 8;
const DATETIME_LONG_LEN: usize = 16;

const SIGN_PLUS: u8 = 0x0c;
const SIGN_MINUS: u8 = 0x0d;

/// Resolve a known extension payload, leaving unknown ones opaque.
pub(crate) fn decode_ext(type_id: i8, data: &[u8]) -> Result<ValueRef<'_>, CodecError> {
    let value = match type_id {
        EXT_DECIMAL => ValueRef::Decimal(decode_decimal(data)?),
        EXT_UUID => ValueRef::Uuid(decode_uuid(data)?),
        EXT_DATETIME => ValueRef::Datetime(decode_datetime(data)?),
        _ => ValueRef::Ext { type_id, data },
    };

    Ok(value)
}

///
/// Decimal
///
/// Payload: scale as a MessagePack integer, then packed BCD digits with
/// the sign in the final nibble.
///

fn decode_decimal(payload: &[u8]) -> Result<Decimal, CodecError> {
    let mut buf = payload;
    let mut scale = match read_header(&mut buf)? {
        Header::Uint(v) => {
            i64::try_from(v).map_err(|_| CodecError::InvalidDecimal("scale out of range"))?
        }
        Header::Int(v) => v,
        _ => return Err(CodecError::InvalidDecimal("scale is not an integer")),
    };

    let (&last, body) = buf
        .split_last()
        .ok_or(CodecError::InvalidDecimal("missing digits"))?;

    let negative = match last & 0x0f {
        0x0b | SIGN_MINUS => true,
        0x0a | SIGN_PLUS | 0x0e | 0x0f => false,
        _ => return Err(CodecError::InvalidDecimal("invalid sign nibble")),
    };

    let mut mantissa: i128 = 0;
    for &byte in body {
        push_digit(&mut mantissa, byte >> 4)?;
        push_digit(&mut mantissa, byte & 0x0f)?;
    }
    push_digit(&mut mantissa, last >> 4)?;

    // trailing zeros can only shed as many places as there are digits
    let digits = i64::try_from(body.len() * 2 + 1)
        .map_err(|_| CodecError::InvalidDecimal("too many digits"))?;
    if scale < -DECIMAL_MAX_DIGITS || scale > DECIMAL_MAX_SCALE.saturating_add(digits) {
        return Err(CodecError::InvalidDecimal("scale out of range"));
    }
    if mantissa == 0 {
        return Ok(Decimal::ZERO);
    }

    // exponent form: 1E+3 arrives as mantissa 1, scale -3
    while scale < 0 {
        mantissa = mantissa
            .checked_mul(10)
            .ok_or(CodecError::InvalidDecimal("out of range"))?;
        scale += 1;
    }

    while scale > DECIMAL_MAX_SCALE && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    if scale > DECIMAL_MAX_SCALE {
        return Err(CodecError::InvalidDecimal("scale out of range"));
    }

    if negative {
        mantissa = -mantissa;
    }

    let scale =
        u32::try_from(scale).map_err(|_| CodecError::InvalidDecimal("scale out of range"))?;

    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|_| CodecError::InvalidDecimal("out of range"))
}

fn push_digit(mantissa: &mut i128, digit: u8) -> Result<(), CodecError> {
    if digit > 9 {
        return Err(CodecError::InvalidDecimal("invalid digit nibble"));
    }

    *mantissa = mantissa
        .checked_mul(10)
        .and_then(|m| m.checked_add(i128::from(digit)))
        .ok_or(CodecError::InvalidDecimal("too many digits"))?;

    Ok(())
}

pub(crate) fn encode_decimal(out: &mut Vec<u8>, value: &Decimal) -> Result<(), CodecError> {
    let mut payload = Vec::with_capacity(20);
    rmp::encode::write_sint(&mut payload, i64::from(value.scale())).map_err(CodecError::write)?;

    let digits = value.mantissa().unsigned_abs().to_string();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        SIGN_MINUS
    } else {
        SIGN_PLUS
    };

    // pad to an even nibble count, sign included
    let mut nibbles = Vec::with_capacity(digits.len() + 2);
    if digits.len() % 2 == 0 {
        nibbles.push(0);
    }
    nibbles.extend(digits.bytes().map(|b| b - b'0'));
    nibbles.push(sign);

    payload.extend(nibbles.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]));

    write_ext(out, EXT_DECIMAL, &payload)
}

///
/// Uuid
///

fn decode_uuid(payload: &[u8]) -> Result<Uuid, CodecError> {
    Uuid::from_slice(payload).map_err(|_| CodecError::InvalidUuid { len: payload.len() })
}

pub(crate) fn encode_uuid(out: &mut Vec<u8>, value: &Uuid) -> Result<(), CodecError> {
    write_ext(out, EXT_UUID, value.as_bytes())
}

///
/// Datetime
///
/// Payload: little-endian epoch seconds, optionally followed by
/// nanoseconds, timezone offset (minutes) and timezone index.
///

fn decode_datetime(payload: &[u8]) -> Result<Datetime, CodecError> {
    let invalid = || CodecError::InvalidDatetime { len: payload.len() };

    if payload.len() != DATETIME_SHORT_LEN && payload.len() != DATETIME_LONG_LEN {
        return Err(invalid());
    }

    let epoch = i64::from_le_bytes(payload[0..8].try_into().map_err(|_| invalid())?);
    if payload.len() == DATETIME_SHORT_LEN {
        return Ok(Datetime::from_epoch(epoch));
    }

    let nsec = i32::from_le_bytes(payload[8..12].try_into().map_err(|_| invalid())?);
    let tzoffset = i16::from_le_bytes(payload[12..14].try_into().map_err(|_| invalid())?);
    let tzindex = i16::from_le_bytes(payload[14..16].try_into().map_err(|_| invalid())?);

    Ok(Datetime {
        epoch,
        nsec,
        tzoffset,
        tzindex,
    })
}

pub(crate) fn encode_datetime(out: &mut Vec<u8>, value: &Datetime) -> Result<(), CodecError> {
    let mut payload = Vec::with_capacity(DATETIME_LONG_LEN);
    payload.extend_from_slice(&value.epoch.to_le_bytes());

    if value.nsec != 0 || value.tzoffset != 0 || value.tzindex != 0 {
        payload.extend_from_slice(&value.nsec.to_le_bytes());
        payload.extend_from_slice(&value.tzoffset.to_le_bytes());
        payload.extend_from_slice(&value.tzindex.to_le_bytes());
    }

    write_ext(out, EXT_DATETIME, &payload)
}

pub(crate) fn write_ext(out: &mut Vec<u8>, type_id: i8, payload: &[u8]) -> Result<(), CodecError> {
    let len = u32::try_from(payload.len()).map_err(|_| CodecError::TooLarge {
        len: payload.len(),
    })?;

    rmp::encode::write_ext_meta(out, len, type_id).map_err(CodecError::write)?;
    out.extend_from_slice(payload);

    Ok(())
}
