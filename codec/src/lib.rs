//! Reference SSZ encoder for the conformance vector generator.
//!
//! Vector generation treats encoding as ground truth: every valid test case
//! carries the bytes produced here. The [`Codec`] trait is the seam so another
//! encoder can be swapped in.
//!
//! # Design Principles
//!
//! - **Deterministic** - Same value and schema always produce the same bytes.
//! - **Strict** - Values outside the schema's domain are rejected, never truncated.
//! - **Encode only** - Decoding is the job of the implementation under test.

mod error;
mod ssz;

use schema::{Schema, Value};

pub use error::{CodecError, CodecResult};
pub use ssz::SszCodec;

/// Canonical serialization of a value against its schema.
pub trait Codec {
    /// Encodes `value` as described by `schema`.
    fn encode(&self, value: &Value, schema: &Schema) -> CodecResult<Vec<u8>>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn encode(&self, value: &Value, schema: &Schema) -> CodecResult<Vec<u8>> {
        (**self).encode(value, schema)
    }
}
