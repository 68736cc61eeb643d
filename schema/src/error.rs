//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Bit width is not one of the supported UInt widths.
    InvalidBitWidth { bits: u16 },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitWidth { bits } => {
                write!(f, "unsupported uint bit width {bits}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
