//! Schema definitions and structural queries.

use std::fmt;

use crate::error::{SchemaError, SchemaResult};
use crate::OFFSET_SIZE;

/// All supported UInt bit widths, ascending.
pub const UINT_BITS: &[u16] = &[8, 16, 32, 64, 128, 256, 512];

/// UInt widths used as leaves inside composite schemas.
pub const BASIC_UINT_BITS: &[u16] = &[8, 16, 32, 64, 128, 256];

/// The shape of a value and how it is serialized.
///
/// Field order of a [`Schema::Container`] is part of its identity: two
/// containers are equal only if they hold the same field schemas in the same
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Single byte, `0x00` or `0x01`.
    Boolean,

    /// Little-endian unsigned integer of `bits / 8` bytes.
    UInt { bits: u16 },

    /// Variable-length homogeneous sequence.
    List { element: Box<Schema> },

    /// Fixed-length homogeneous sequence. `length` may be zero.
    Vector { element: Box<Schema>, length: usize },

    /// Ordered heterogeneous record with positional fields.
    Container { fields: Vec<Schema> },
}

/// Discriminant of a [`Schema`] without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Boolean,
    UInt,
    List,
    Vector,
    Container,
}

impl Schema {
    /// Creates a boolean schema.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Boolean
    }

    /// Creates a UInt schema after checking the width is supported.
    pub fn uint(bits: u16) -> SchemaResult<Self> {
        if UINT_BITS.contains(&bits) {
            Ok(Self::UInt { bits })
        } else {
            Err(SchemaError::InvalidBitWidth { bits })
        }
    }

    /// Creates a list schema.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Creates a vector schema.
    #[must_use]
    pub fn vector(element: Self, length: usize) -> Self {
        Self::Vector {
            element: Box::new(element),
            length,
        }
    }

    /// Creates a container schema from positional fields.
    #[must_use]
    pub fn container(fields: Vec<Self>) -> Self {
        Self::Container { fields }
    }

    /// Returns the kind of this schema.
    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Boolean => SchemaKind::Boolean,
            Self::UInt { .. } => SchemaKind::UInt,
            Self::List { .. } => SchemaKind::List,
            Self::Vector { .. } => SchemaKind::Vector,
            Self::Container { .. } => SchemaKind::Container,
        }
    }

    /// Returns true for `Boolean` and `UInt`.
    #[must_use]
    pub const fn is_basic(&self) -> bool {
        matches!(self, Self::Boolean | Self::UInt { .. })
    }

    /// Returns the element schema of a list or vector.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::List { element } | Self::Vector { element, .. } => Some(element),
            Self::Boolean | Self::UInt { .. } | Self::Container { .. } => None,
        }
    }

    /// Returns the encoded size in bytes if every value of this schema
    /// serializes to the same length.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Boolean => Some(1),
            Self::UInt { bits } => Some(usize::from(*bits) / 8),
            Self::List { .. } => None,
            Self::Vector { element, length } => element.fixed_size()?.checked_mul(*length),
            Self::Container { fields } => fields
                .iter()
                .try_fold(0usize, |total, field| total.checked_add(field.fixed_size()?)),
        }
    }

    /// Returns true if the encoded size does not depend on the value.
    #[must_use]
    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size().is_some()
    }

    /// Bytes this schema occupies in the fixed part of an enclosing
    /// composite: its own size if fixed, otherwise one offset.
    #[must_use]
    pub fn fixed_part_size(&self) -> usize {
        self.fixed_size().unwrap_or(OFFSET_SIZE)
    }

    /// Returns the nesting depth, counting basic schemas as depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Boolean | Self::UInt { .. } => 1,
            Self::List { element } | Self::Vector { element, .. } => 1 + element.depth(),
            Self::Container { fields } => 1 + fields.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "bool"),
            Self::UInt { bits } => write!(f, "uint{bits}"),
            Self::List { element } => write!(f, "List[{element}]"),
            Self::Vector { element, length } => write!(f, "Vector[{element}, {length}]"),
            Self::Container { fields } => {
                write!(f, "Container[")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "bool",
            Self::UInt => "uint",
            Self::List => "list",
            Self::Vector => "vector",
            Self::Container => "container",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint(bits: u16) -> Schema {
        Schema::uint(bits).unwrap()
    }

    #[test]
    fn uint_accepts_supported_widths() {
        for &bits in UINT_BITS {
            assert_eq!(uint(bits), Schema::UInt { bits });
        }
    }

    #[test]
    fn uint_rejects_unsupported_widths() {
        for bits in [0, 1, 7, 12, 24, 1024] {
            let err = Schema::uint(bits).unwrap_err();
            assert_eq!(err, SchemaError::InvalidBitWidth { bits });
        }
    }

    #[test]
    fn basic_fixed_sizes() {
        assert_eq!(Schema::boolean().fixed_size(), Some(1));
        assert_eq!(uint(8).fixed_size(), Some(1));
        assert_eq!(uint(256).fixed_size(), Some(32));
        assert_eq!(uint(512).fixed_size(), Some(64));
    }

    #[test]
    fn composite_fixed_sizes() {
        assert_eq!(Schema::list(uint(8)).fixed_size(), None);
        assert_eq!(Schema::vector(uint(16), 3).fixed_size(), Some(6));
        assert_eq!(Schema::vector(Schema::list(uint(8)), 2).fixed_size(), None);
        assert_eq!(Schema::vector(Schema::list(uint(8)), 0).fixed_size(), None);
        assert_eq!(
            Schema::container(vec![Schema::boolean(), uint(32)]).fixed_size(),
            Some(5)
        );
        assert_eq!(Schema::container(Vec::new()).fixed_size(), Some(0));
        assert_eq!(
            Schema::container(vec![Schema::boolean(), Schema::list(uint(8))]).fixed_size(),
            None
        );
    }

    #[test]
    fn fixed_part_size_uses_offset_for_variable() {
        assert_eq!(uint(64).fixed_part_size(), 8);
        assert_eq!(Schema::list(uint(64)).fixed_part_size(), OFFSET_SIZE);
    }

    #[test]
    fn container_equality_is_order_sensitive() {
        let a = Schema::container(vec![Schema::boolean(), uint(8)]);
        let b = Schema::container(vec![uint(8), Schema::boolean()]);
        let c = Schema::container(vec![Schema::boolean(), uint(8)]);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn kinds_and_elements() {
        let list = Schema::list(Schema::boolean());
        assert_eq!(list.kind(), SchemaKind::List);
        assert_eq!(list.element(), Some(&Schema::Boolean));
        assert!(!list.is_basic());
        assert!(uint(8).is_basic());
        assert_eq!(Schema::container(Vec::new()).element(), None);
    }

    #[test]
    fn depth_counts_layers() {
        assert_eq!(Schema::boolean().depth(), 1);
        assert_eq!(Schema::list(Schema::vector(uint(8), 2)).depth(), 3);
        assert_eq!(Schema::container(Vec::new()).depth(), 1);
    }

    #[test]
    fn display_is_compact() {
        let schema = Schema::container(vec![
            Schema::list(uint(8)),
            Schema::vector(Schema::boolean(), 3),
        ]);
        assert_eq!(schema.to_string(), "Container[List[uint8], Vector[bool, 3]]");
    }
}
