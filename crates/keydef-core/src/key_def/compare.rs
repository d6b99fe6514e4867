use crate::{
    codec::{self, CodecError},
    error::{ErrorOrigin, KeyDefError},
    key_def::{KeyDef, KeyPart},
    obs::sink::{self, MetricsEvent},
    tuple::Tuple,
    value::{ValueRef, compare_with_strategy},
};
use std::cmp::Ordering;

impl KeyDef {
    /// Three-way comparison of two tuples, part by part.
    ///
    /// Both tuples are validated against every part before any comparison.
    pub fn compare(&self, left: &Tuple, right: &Tuple) -> Result<Ordering, KeyDefError> {
        let result = self.compare_tuples(left, right);
        match &result {
            Ok(_) => sink::record(MetricsEvent::Compare),
            Err(err) => sink::record_error(err),
        }

        result
    }

    /// Three-way comparison of a tuple against an encoded key prefix.
    ///
    /// `key` is a MessagePack array with at most `part_count` elements;
    /// a shorter key compares only the parts it covers.
    pub fn compare_with_key(&self, tuple: &Tuple, key: &[u8]) -> Result<Ordering, KeyDefError> {
        let result = self.compare_tuple_with_key(tuple, key);
        match &result {
            Ok(_) => sink::record(MetricsEvent::CompareWithKey),
            Err(err) => sink::record_error(err),
        }

        result
    }

    fn compare_tuples(&self, left: &Tuple, right: &Tuple) -> Result<Ordering, KeyDefError> {
        let left = self.resolve_all(left, ErrorOrigin::Compare)?;
        let right = self.resolve_all(right, ErrorOrigin::Compare)?;

        Ok(compare_parts(
            self.parts
                .iter()
                .zip(left.iter().zip(&right))
                .map(|(part, (l, r))| (part, &l.value, &r.value)),
        ))
    }

    fn compare_tuple_with_key(&self, tuple: &Tuple, key: &[u8]) -> Result<Ordering, KeyDefError> {
        let fields = self.resolve_all(tuple, ErrorOrigin::Compare)?;
        let elements = self.decode_key(key)?;

        Ok(compare_parts(
            self.parts
                .iter()
                .zip(fields.iter().zip(&elements))
                .map(|(part, (field, element))| (part, &field.value, element)),
        ))
    }

    // Element types are not checked; mismatches order by scalar class.
    fn decode_key<'k>(&self, key: &'k [u8]) -> Result<Vec<ValueRef<'k>>, KeyDefError> {
        let malformed = |err| KeyDefError::codec(ErrorOrigin::Compare, err);

        let mut buf = key;
        let count = codec::read_array_len(&mut buf).map_err(malformed)? as usize;
        if count > self.parts.len() {
            return Err(KeyDefError::malformed_input(
                ErrorOrigin::Compare,
                format!(
                    "Invalid key part count (expected [0..{}], got {count})",
                    self.parts.len()
                ),
            ));
        }

        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(codec::decode(&mut buf).map_err(malformed)?);
        }
        if !buf.is_empty() {
            return Err(malformed(CodecError::TrailingBytes));
        }

        Ok(elements)
    }
}

fn compare_parts<'v>(
    fields: impl Iterator<Item = (&'v KeyPart, &'v ValueRef<'v>, &'v ValueRef<'v>)>,
) -> Ordering {
    for (part, left, right) in fields {
        let ord = compare_part(part, left, right);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

/// Null sorts below every value and equal to itself.
fn compare_part(part: &KeyPart, left: &ValueRef<'_>, right: &ValueRef<'_>) -> Ordering {
    match (left.is_nil(), right.is_nil()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => compare_with_strategy(
            part.field_type.strategy(),
            part.collation(),
            left,
            right,
        ),
    }
}
