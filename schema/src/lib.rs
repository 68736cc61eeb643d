//! Type schema and value model for SSZ conformance vector generation.
//!
//! This crate defines the shapes that test vectors are generated for:
//! - A closed schema model (bool, fixed-width uints, lists, vectors, containers)
//! - A runtime value model that mirrors those shapes
//! - Deterministic structural hashing of schemas
//!
//! # Design Principles
//!
//! - **Closed set** - Every consumer matches all five schema kinds exhaustively.
//! - **Positional containers** - Container fields carry no names; order is identity.
//! - **Deterministic hashing** - Schema hash is stable given the same structure.

mod error;
mod hash;
mod schema;
mod value;

pub use error::{SchemaError, SchemaResult};
pub use hash::schema_hash;
pub use schema::{Schema, SchemaKind, BASIC_UINT_BITS, UINT_BITS};
pub use value::Value;

/// Size in bytes of an SSZ offset for variable-size parts.
pub const OFFSET_SIZE: usize = 4;
