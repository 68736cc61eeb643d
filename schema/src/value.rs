//! Runtime values shaped by a [`Schema`](crate::Schema).

use num_bigint::{BigInt, BigUint};

/// A concrete value to be serialized against a schema.
///
/// Lists, vectors and containers all use [`Value::Sequence`]; container
/// fields are matched to the schema by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),

    /// Signed so that out-of-domain integers (e.g. `-1`) can be represented
    /// by invalid test cases.
    Integer(BigInt),

    /// Raw bytes, accepted in place of a sequence of `uint8`.
    Bytes(Vec<u8>),

    Sequence(Vec<Value>),
}

impl Value {
    /// Creates an integer value from an unsigned big integer.
    #[must_use]
    pub fn uint(value: BigUint) -> Self {
        Self::Integer(BigInt::from(value))
    }

    /// Creates an integer value from a primitive.
    #[must_use]
    pub fn int(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    /// Short name of the value shape for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the elements of a sequence value.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Bool(_) | Self::Integer(_) | Self::Bytes(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Self::uint(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}
