use crate::codec::CodecError;

/// Raw encoding of `nil`.
pub(crate) const NIL: &[u8] = &[0xc0];

fn container_len(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::TooLarge { len })
}

pub(crate) fn write_array_header(out: &mut Vec<u8>, len: usize) -> Result<(), CodecError> {
    rmp::encode::write_array_len(out, container_len(len)?).map_err(CodecError::write)?;

    Ok(())
}

pub(crate) fn write_map_header(out: &mut Vec<u8>, len: usize) -> Result<(), CodecError> {
    rmp::encode::write_map_len(out, container_len(len)?).map_err(CodecError::write)?;

    Ok(())
}
