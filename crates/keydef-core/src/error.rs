use crate::{
    codec::CodecError,
    config::ConfigError,
    key_def::{PartSpecError, TupleFieldError},
    path::PathError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// KeyDefError
///
/// Structured error returned by every public engine operation.
/// `class` is the stable classification callers should branch on;
/// `message` is human-readable and may change between releases.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct KeyDefError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl KeyDefError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a caller-fixable descriptor error.
    pub(crate) fn illegal_params(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::IllegalParams, origin, message)
    }

    /// Construct a descriptor error attributed to one key part (zero-based index).
    pub(crate) fn illegal_part(index: usize, message: impl fmt::Display) -> Self {
        Self {
            class: ErrorClass::IllegalParams,
            origin: ErrorOrigin::Compile,
            message: format!("{message} (key part {})", index + 1),
            detail: Some(ErrorDetail::Part { index }),
        }
    }

    /// Construct a record-versus-definition validation failure.
    pub(crate) fn key_validation(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::KeyValidation, origin, message)
    }

    pub(crate) fn malformed_input(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::MalformedInput, origin, message)
    }

    /// Construct an allocation failure.
    pub(crate) fn out_of_memory(
        origin: ErrorOrigin,
        size: usize,
        allocator: &'static str,
        purpose: &'static str,
    ) -> Self {
        Self {
            class: ErrorClass::OutOfMemory,
            origin,
            message: format!("Failed to allocate {size} bytes in {allocator} for {purpose}"),
            detail: Some(ErrorDetail::Allocation {
                size,
                allocator,
                purpose,
            }),
        }
    }

    /// Map a codec failure observed while reading caller input.
    pub(crate) fn codec(origin: ErrorOrigin, err: CodecError) -> Self {
        Self::malformed_input(origin, format!("Invalid MsgPack: {err}"))
    }

    /// Map a lazily detected path syntax failure.
    pub(crate) fn path(origin: ErrorOrigin, err: PathError) -> Self {
        Self::illegal_params(origin, err.to_string())
    }

    /// Re-attribute the error to another engine surface.
    #[must_use]
    pub const fn with_origin(mut self, origin: ErrorOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub const fn is_illegal_params(&self) -> bool {
        matches!(self.class, ErrorClass::IllegalParams)
    }

    #[must_use]
    pub const fn is_key_validation(&self) -> bool {
        matches!(self.class, ErrorClass::KeyValidation)
    }

    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self.class, ErrorClass::MalformedInput)
    }

    #[must_use]
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self.class, ErrorClass::OutOfMemory)
    }

    /// Zero-based key part index, when the failure is attributed to one part.
    #[must_use]
    pub const fn part_index(&self) -> Option<usize> {
        match self.detail {
            Some(ErrorDetail::Part { index }) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<CodecError> for KeyDefError {
    fn from(err: CodecError) -> Self {
        Self::codec(ErrorOrigin::Codec, err)
    }
}

impl From<PartSpecError> for KeyDefError {
    fn from(err: PartSpecError) -> Self {
        Self::illegal_params(ErrorOrigin::Compile, err.to_string())
    }
}

impl From<TupleFieldError> for KeyDefError {
    fn from(err: TupleFieldError) -> Self {
        Self::key_validation(ErrorOrigin::Compare, err.to_string())
    }
}

impl From<ConfigError> for KeyDefError {
    fn from(err: ConfigError) -> Self {
        Self::illegal_params(ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorDetail
///
/// Structured, class-specific error detail carried by [`KeyDefError`].
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorDetail {
    Part {
        index: usize,
    },
    Allocation {
        size: usize,
        allocator: &'static str,
        purpose: &'static str,
    },
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    IllegalParams,
    KeyValidation,
    MalformedInput,
    OutOfMemory,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IllegalParams => "illegal_params",
            Self::KeyValidation => "key_validation",
            Self::MalformedInput => "malformed_input",
            Self::OutOfMemory => "out_of_memory",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Codec,
    Compare,
    Compile,
    Config,
    Extract,
    Merge,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Codec => "codec",
            Self::Compare => "compare",
            Self::Compile => "compile",
            Self::Config => "config",
            Self::Extract => "extract",
            Self::Merge => "merge",
        };
        write!(f, "{label}")
    }
}
