//! Error types for vector generation.

use std::fmt;

use codec::CodecError;
use schema::SchemaError;

/// Result type for vector generation.
pub type VectorResult<T> = Result<T, VectorError>;

/// Errors that abort generation of a suite.
///
/// All of these indicate a defect in the generator or its configuration;
/// a suite is never emitted with a case skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Test case violates the valid/invalid invariant.
    InvalidTestCase {
        valid: bool,
        has_value: bool,
        has_serial: bool,
    },

    /// The codec rejected a value produced for a valid case.
    Codec(CodecError),

    /// A schema could not be constructed.
    Schema(SchemaError),

    /// Generation limits are inconsistent.
    InvalidLimits { reason: &'static str },

    /// Serializing the rendered document failed.
    Document { message: String },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTestCase {
                valid: true,
                has_value,
                has_serial,
            } => {
                write!(
                    f,
                    "valid test case requires value and ssz (value: {has_value}, ssz: {has_serial})"
                )
            }
            Self::InvalidTestCase { valid: false, .. } => {
                write!(f, "invalid test case must not carry both value and ssz")
            }
            Self::Codec(e) => write!(f, "codec error: {e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::InvalidLimits { reason } => write!(f, "invalid generation limits: {reason}"),
            Self::Document { message } => write!(f, "document serialization failed: {message}"),
        }
    }
}

impl std::error::Error for VectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for VectorError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

impl From<SchemaError> for VectorError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document {
            message: err.to_string(),
        }
    }
}
