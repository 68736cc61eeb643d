//! Conformance test vector generation for SSZ.
//!
//! This crate builds schemas and values, encodes valid cases through a
//! [`codec::Codec`], constructs malformed inputs directly, and renders
//! everything into ordered, titled suite documents.
//!
//! # Design Principles
//!
//! - **Reproducible** - A suite depends only on its id, seed and limits.
//! - **No silent skips** - A case that violates the valid/invalid invariant aborts its suite.
//! - **Text-safe output** - Integers render as decimal strings and bytes as hex.
//!
//! # Example
//!
//! ```
//! use vectors::{GenLimits, Generator, SuiteId};
//!
//! let mut generator = Generator::new(GenLimits::for_testing()).unwrap();
//! let suite = generator.generate(SuiteId::BoolValues, 0).unwrap();
//! assert_eq!(suite.test_cases.len(), 2);
//! ```

mod boundary;
mod catalog;
mod determinism;
mod error;
mod limits;
mod render;
mod schema_gen;
mod suite;
mod value_gen;

pub use boundary::{
    bool_invalid_byte_cases, uint_out_of_bounds_cases, wrong_length_cases, wrong_length_serials,
    wrong_lengths, INVALID_BOOL_BYTES,
};
pub use catalog::{valid_case, Generator, SuiteId};
pub use determinism::{seeded_rng, with_seed, SeedGuard, SuiteRng};
pub use error::{VectorError, VectorResult};
pub use limits::GenLimits;
pub use render::{
    render_hex, render_type, render_value, RenderedValue, TestCase, TestCaseBuilder,
    TypeDescriptor,
};
pub use schema_gen::{
    basic_schemas, deep_nested_schema, random_basic_schema, random_composite,
    shallow_nested_schemas, CompositeKind, ShallowSchema,
};
pub use suite::{Release, TestSuite};
pub use value_gen::{
    bool_values, list_boundary_length, list_lengths, random_elements, random_uint, random_value,
    representative_values, uint_edge_values, uint_max, ValueBounds,
};
