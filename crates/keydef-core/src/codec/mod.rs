//! Module: codec
//! Responsibility: MessagePack framing for tuples, keys and field values.
//! Does not own: value ordering or key part semantics.
//! Boundary: every byte slice supplied by a caller is parsed here first.

mod decode;
mod encode;
mod error;
mod ext;


pub use error::CodecError;
pub use ext::{EXT_DATETIME, EXT_DECIMAL, EXT_UUID};

pub(crate) use decode::{
    Header, array_offsets, decode, decode_exact, read_array_len, read_header, skip_value,
    split_value,
};
pub(crate) use encode::{NIL, write_array_header, write_map_header};
pub(crate) use ext::{encode_datetime, encode_decimal, encode_uuid, write_ext};
