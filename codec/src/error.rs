//! Error types for codec operations.

use std::fmt;

use schema::SchemaKind;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding a value against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value shape does not match the schema kind.
    KindMismatch {
        expected: SchemaKind,
        found: &'static str,
    },

    /// Integer does not fit in the schema's bit width.
    IntegerOutOfRange {
        bits: u16,
        /// Decimal rendering of the rejected value.
        value: String,
    },

    /// UInt width outside the supported power-of-two widths.
    UnsupportedWidth { bits: u16 },

    /// Vector value has the wrong number of elements.
    LengthMismatch { expected: usize, actual: usize },

    /// Container value has the wrong number of fields.
    FieldCountMismatch { expected: usize, actual: usize },

    /// A variable-size part starts beyond the 32-bit offset range.
    OffsetOverflow { offset: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, found } => {
                write!(f, "expected {expected} value but got {found}")
            }
            Self::IntegerOutOfRange { bits, value } => {
                write!(f, "integer {value} does not fit in uint{bits}")
            }
            Self::UnsupportedWidth { bits } => {
                write!(f, "unsupported uint width: {bits} bits")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "vector length mismatch: expected {expected}, got {actual}")
            }
            Self::FieldCountMismatch { expected, actual } => {
                write!(f, "container expects {expected} fields, got {actual}")
            }
            Self::OffsetOverflow { offset } => {
                write!(f, "offset {offset} exceeds u32::MAX")
            }
        }
    }
}

impl std::error::Error for CodecError {}
