//! ## Crate layout
//! - `core`: compiled key definitions, tuples, values and the MessagePack codec.
//! - `primitives`: field type names, value kinds and ordering strategies.
//!
//! The `prelude` module covers the usual path: build a definition from a
//! part table, then compare, extract and merge.

pub use keydef_core as core;
pub use keydef_primitives as primitives;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::primitives::{CompareStrategy, FieldType, ValueKind};
}
