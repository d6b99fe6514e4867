use crate::{
    collation::Collation,
    config::EngineConfig,
    error::{ErrorOrigin, KeyDefError},
    key_def::{KeyDef, KeyPart, PartSpec, PartType},
    path,
};
use keydef_primitives::is_supported_type_name;
use thiserror::Error as ThisError;

///
/// PartSpecError
///
/// Rejection of one raw part description.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PartSpecError {
    #[error("fieldno or field must not be nil")]
    MissingFieldno,

    #[error("Conflicting options: fieldno and field")]
    ConflictingFieldno,

    #[error("fieldno must be a positive integer")]
    ZeroFieldno,

    #[error("type must not be nil")]
    MissingType,

    #[error("Unsupported field type: {0}")]
    UnsupportedType(String),

    #[error("Multikey JSON path is not supported")]
    MultikeyPath,

    #[error("Unknown collation: '{0}'")]
    UnknownCollation(String),
}

impl TryFrom<&PartSpec> for KeyPart {
    type Error = KeyDefError;

    fn try_from(spec: &PartSpec) -> Result<Self, Self::Error> {
        Ok(compile_part(spec, crate::config::current())?)
    }
}

/// Validate and compile a full part list.
pub(super) fn compile(specs: &[PartSpec], config: &EngineConfig) -> Result<KeyDef, KeyDefError> {
    if specs.is_empty() {
        return Err(KeyDefError::illegal_params(
            ErrorOrigin::Compile,
            "At least one key part is required",
        ));
    }

    if specs.len() > config.max_parts {
        return Err(KeyDefError::illegal_params(
            ErrorOrigin::Compile,
            format!(
                "Too many key parts (expected at most {}, got {})",
                config.max_parts,
                specs.len()
            ),
        ));
    }

    let mut parts = Vec::new();
    parts.try_reserve_exact(specs.len()).map_err(|_| {
        KeyDefError::out_of_memory(
            ErrorOrigin::Compile,
            specs.len() * size_of::<KeyPart>(),
            "heap",
            "key parts",
        )
    })?;

    for (index, spec) in specs.iter().enumerate() {
        let part = compile_part(spec, config).map_err(|err| KeyDefError::illegal_part(index, err))?;
        parts.push(part);
    }

    Ok(KeyDef::from_parts(parts))
}

// Check order: locator, type, path, collation.
fn compile_part(spec: &PartSpec, config: &EngineConfig) -> Result<KeyPart, PartSpecError> {
    let number = match (spec.fieldno, spec.field) {
        (None, None) => return Err(PartSpecError::MissingFieldno),
        (Some(_), Some(_)) => return Err(PartSpecError::ConflictingFieldno),
        (Some(n), None) | (None, Some(n)) => n,
    };
    let fieldno = number.checked_sub(1).ok_or(PartSpecError::ZeroFieldno)?;

    let type_name = spec
        .field_type
        .as_deref()
        .ok_or(PartSpecError::MissingType)?;
    if !is_supported_type_name(type_name) {
        return Err(PartSpecError::UnsupportedType(type_name.to_string()));
    }

    let path = match spec.path.as_deref() {
        None | Some("") => None,
        Some(p) if path::contains_multikey(p) => return Err(PartSpecError::MultikeyPath),
        Some(p) => Some(p.to_string()),
    };

    let collation = spec
        .collation
        .as_deref()
        .map(|name| {
            Collation::resolve(name, config)
                .ok_or_else(|| PartSpecError::UnknownCollation(name.to_string()))
        })
        .transpose()?;

    Ok(KeyPart {
        fieldno,
        field_type: PartType::parse(type_name),
        is_nullable: spec.is_nullable,
        collation,
        path,
    })
}
