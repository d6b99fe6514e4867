use crate::{
    codec,
    error::{ErrorOrigin, KeyDefError},
    key_def::KeyPart,
    tuple::{FieldAccessError, Tuple},
    value::ValueRef,
};
use thiserror::Error as ThisError;

///
/// TupleFieldError
///
/// A tuple field that does not satisfy its key part.
/// `field` is the one-based field label, path included: `[2].name`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TupleFieldError {
    #[error("Tuple field {field} required by space format is missing")]
    Missing { field: String },

    #[error(
        "Tuple field {field} type does not match one required by operation: \
         expected {expected}, got {actual}"
    )]
    TypeMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },
}

///
/// ResolvedField
///
/// A key part's field located and type-checked in one tuple.
/// `raw` is `None` only for an absent nullable field.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedField<'t> {
    pub raw: Option<&'t [u8]>,
    pub value: ValueRef<'t>,
}

fn field_label(part: &KeyPart) -> String {
    format!("[{}]{}", part.fieldno + 1, part.path().unwrap_or_default())
}

/// Locate, decode and check the field one key part designates.
pub(crate) fn resolve_field<'t>(
    part: &KeyPart,
    tuple: &'t Tuple,
    origin: ErrorOrigin,
) -> Result<ResolvedField<'t>, KeyDefError> {
    let raw = tuple
        .field_at(part.field_index(), part.path())
        .map_err(|err| match err {
            FieldAccessError::Path(err) => KeyDefError::path(origin, err),
            FieldAccessError::Codec(err) => KeyDefError::codec(origin, err),
        })?;

    let Some(raw) = raw else {
        if part.is_nullable {
            return Ok(ResolvedField {
                raw: None,
                value: ValueRef::Nil,
            });
        }

        let err = TupleFieldError::Missing {
            field: field_label(part),
        };
        return Err(KeyDefError::from(err).with_origin(origin));
    };

    let value = codec::decode_exact(raw).map_err(|err| KeyDefError::codec(origin, err))?;
    check_value(part, &value).map_err(|err| KeyDefError::from(err).with_origin(origin))?;

    Ok(ResolvedField {
        raw: Some(raw),
        value,
    })
}

fn check_value(part: &KeyPart, value: &ValueRef<'_>) -> Result<(), TupleFieldError> {
    let accepted = if value.is_nil() {
        part.is_nullable
    } else {
        part.field_type.accepts(value.kind())
    };

    if accepted {
        Ok(())
    } else {
        Err(TupleFieldError::TypeMismatch {
            field: field_label(part),
            expected: part.field_type.name().to_string(),
            actual: value.kind().label(),
        })
    }
}
