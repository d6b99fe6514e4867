//! Module: key_def
//! Responsibility: compiled key definitions and the operations over them:
//! compare, compare with key, extract, merge and table conversion.
//! Does not own: MessagePack framing (`codec`) or value ordering (`value`).
//! Boundary: every public entry validates its tuples before reading values.

mod compare;
mod compile;
mod extract;
mod merge;
mod part;
mod table;
mod validate;

#[cfg(test)]
mod tests;

use crate::{
    config::{self, EngineConfig},
    error::{ErrorOrigin, KeyDefError},
    obs::sink::{self, MetricsEvent},
    tuple::Tuple,
};

// re-exports
pub use compile::PartSpecError;
pub use part::{KeyPart, PartType};
pub use table::{KeyDefTable, PartSpec};
pub use validate::TupleFieldError;

pub(crate) use validate::{ResolvedField, resolve_field};

///
/// KeyDef
///
/// Ordered, non-empty, immutable list of key parts.
///
/// A definition has exactly one owner; dropping it (or calling
/// [`KeyDef::release`]) frees it. Merge derives a new, independent one.
///

#[derive(Debug, Eq, PartialEq)]
pub struct KeyDef {
    parts: Box<[KeyPart]>,
}

impl KeyDef {
    /// Compile one-based part descriptions against the installed config.
    pub fn new(specs: &[PartSpec]) -> Result<Self, KeyDefError> {
        Self::new_with_config(specs, config::current())
    }

    /// Compile one-based part descriptions against an explicit config.
    pub fn new_with_config(specs: &[PartSpec], config: &EngineConfig) -> Result<Self, KeyDefError> {
        let result = compile::compile(specs, config);
        match &result {
            Ok(key_def) => {
                sink::record(MetricsEvent::Compile {
                    parts: key_def.parts.len() as u64,
                });
                tracing::debug!(parts = key_def.parts.len(), "compiled key definition");
            }
            Err(err) => {
                sink::record(MetricsEvent::CompileRejected);
                tracing::debug!(error = %err, "rejected key definition");
            }
        }

        result
    }

    /// Decode a MessagePack part table and compile it.
    pub fn from_msgpack_table(bytes: &[u8]) -> Result<Self, KeyDefError> {
        KeyDefTable::from_msgpack(bytes)?.compile()
    }

    pub(crate) fn from_parts(parts: Vec<KeyPart>) -> Self {
        Self {
            parts: parts.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Describe every part in the one-based interchange shape.
    #[must_use]
    pub fn to_table(&self) -> KeyDefTable {
        self.parts.iter().map(PartSpec::from).collect()
    }

    /// Release this definition. Equivalent to dropping it.
    pub fn release(self) {
        drop(self);
    }

    /// Validate `tuple` against every part and return the fields in part order.
    pub(crate) fn resolve_all<'t>(
        &self,
        tuple: &'t Tuple,
        origin: ErrorOrigin,
    ) -> Result<Vec<ResolvedField<'t>>, KeyDefError> {
        self.parts
            .iter()
            .map(|part| resolve_field(part, tuple, origin))
            .collect()
    }
}
