use keydef_primitives::ValueKind;
use std::fmt;
use thiserror::Error as ThisError;

///
/// CodecError
///
/// MessagePack framing failures.
/// Raised for caller-supplied bytes; never for bytes the engine produced.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("unexpected end of data")]
    Truncated,

    #[error("trailing bytes after value")]
    TrailingBytes,

    #[error("reserved marker 0xc1")]
    ReservedMarker,

    #[error("expected {expected}, got {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: ValueKind,
    },

    #[error("invalid decimal: {0}")]
    InvalidDecimal(&'static str),

    #[error("invalid uuid: payload of {len} bytes")]
    InvalidUuid { len: usize },

    #[error("invalid datetime: payload of {len} bytes")]
    InvalidDatetime { len: usize },

    #[error("value too large: {len} bytes")]
    TooLarge { len: usize },

    #[error("write failed: {0}")]
    Write(String),
}

impl CodecError {
    pub(crate) fn write(err: impl fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}
