//! Random schema construction.
//!
//! Shallow mode composes every outer composite kind with every inner
//! composite kind around a basic leaf. Deep mode recurses with a fixed
//! continuation probability, so branch lengths are geometric with the
//! configured mean; a hard depth cap bounds the worst case.

use std::fmt;

use rand::Rng;
use schema::{Schema, BASIC_UINT_BITS};
use tracing::trace;

use crate::limits::GenLimits;

/// The three composite schema kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    List,
    Vector,
    Container,
}

impl CompositeKind {
    /// All composite kinds in generation order.
    pub const ALL: [Self; 3] = [Self::List, Self::Vector, Self::Container];

    /// Lowercase name used in tags.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Vector => "vector",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every basic leaf schema: `Boolean`, then each basic UInt width.
pub fn basic_schemas() -> impl Iterator<Item = Schema> {
    let uints = BASIC_UINT_BITS.iter().map(|&bits| Schema::UInt { bits });
    std::iter::once(Schema::Boolean).chain(uints)
}

/// Uniformly picks `Boolean` or a UInt of a uniformly chosen basic width.
pub fn random_basic_schema<R: Rng + ?Sized>(rng: &mut R) -> Schema {
    let index = rng.gen_range(0..=BASIC_UINT_BITS.len());
    match index.checked_sub(1) {
        None => Schema::Boolean,
        Some(width) => Schema::UInt {
            bits: BASIC_UINT_BITS[width],
        },
    }
}

/// Builds one composite of `kind` whose children come from `element`.
///
/// Vector lengths and container field counts are uniform in
/// `[0, max_width]`. Every container field calls `element` independently.
pub fn random_composite<R, F>(
    kind: CompositeKind,
    max_width: usize,
    rng: &mut R,
    mut element: F,
) -> Schema
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Schema,
{
    match kind {
        CompositeKind::List => Schema::list(element(rng)),
        CompositeKind::Vector => {
            let length = rng.gen_range(0..=max_width);
            Schema::vector(element(rng), length)
        }
        CompositeKind::Container => {
            let count = rng.gen_range(0..=max_width);
            let fields = (0..count).map(|_| element(rng)).collect();
            Schema::container(fields)
        }
    }
}

/// A two-layer schema with the composite kinds it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShallowSchema {
    pub outer: CompositeKind,
    pub inner: CompositeKind,
    pub schema: Schema,
}

impl ShallowSchema {
    /// Tag naming the pairing, e.g. `list_of_vector`.
    #[must_use]
    pub fn pairing_tag(&self) -> String {
        format!("{}_of_{}", self.outer, self.inner)
    }
}

fn nested_width(kind: CompositeKind, limits: &GenLimits) -> usize {
    match kind {
        CompositeKind::List => limits.nested_max_list_length,
        CompositeKind::Vector => limits.nested_max_vector_length,
        CompositeKind::Container => limits.nested_max_container_length,
    }
}

/// Builds `outer(inner(leaf))` for every inner/outer pairing, repeated
/// `nested_cases_per_pairing` times with fresh widths and leaves.
pub fn shallow_nested_schemas<R: Rng + ?Sized>(
    limits: &GenLimits,
    rng: &mut R,
) -> Vec<ShallowSchema> {
    let mut schemas = Vec::with_capacity(9 * limits.nested_cases_per_pairing);
    for inner in CompositeKind::ALL {
        for outer in CompositeKind::ALL {
            for _ in 0..limits.nested_cases_per_pairing {
                let inner_width = nested_width(inner, limits);
                let schema = random_composite(outer, nested_width(outer, limits), rng, |rng: &mut R| {
                    random_composite(inner, inner_width, rng, random_basic_schema)
                });
                schemas.push(ShallowSchema {
                    outer,
                    inner,
                    schema,
                });
            }
        }
    }
    schemas
}

/// Builds a randomly deep schema.
///
/// At each layer a coin with probability `1 - 1/E` decides whether to add a
/// composite (uniform over list, vector, container) or stop with a basic
/// leaf. The result never exceeds `deep_max_depth` layers.
pub fn deep_nested_schema<R: Rng + ?Sized>(limits: &GenLimits, rng: &mut R) -> Schema {
    let probability = limits.deep_continue_probability();
    let schema = deep_layer(1, probability, limits, rng);
    trace!(schema = %schema, depth = schema.depth(), "deep schema");
    schema
}

fn deep_layer<R: Rng + ?Sized>(
    depth: usize,
    probability: f64,
    limits: &GenLimits,
    rng: &mut R,
) -> Schema {
    let go_deeper = depth < limits.deep_max_depth && rng.gen_bool(probability);
    if !go_deeper {
        return random_basic_schema(rng);
    }

    let kind = CompositeKind::ALL[rng.gen_range(0..CompositeKind::ALL.len())];
    random_composite(kind, limits.deep_max_width, rng, |rng: &mut R| {
        deep_layer(depth + 1, probability, limits, rng)
    })
}
