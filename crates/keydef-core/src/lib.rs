//! Key definition engine for MessagePack tuples: compile key part
//! descriptions once, then compare tuples, compare tuples with encoded keys,
//! extract keys and merge definitions.

// public exports are one module level down
pub mod codec;
pub mod collation;
pub mod config;
pub mod error;
pub mod key_def;
pub mod obs;
pub mod path;
pub mod region;
pub mod tuple;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::KeyDefError as Error;

///
/// Prelude
///
/// Prelude contains the definition, tuple and value vocabulary.
/// Config, region and metrics plumbing stay in their modules.
///

pub mod prelude {
    pub use crate::{
        error::{ErrorClass, ErrorOrigin, KeyDefError},
        key_def::{KeyDef, KeyDefTable, KeyPart, PartSpec, PartType},
        tuple::Tuple,
        value::{Datetime, Value},
    };
}
