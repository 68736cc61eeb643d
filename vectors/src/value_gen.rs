//! Value generation for a given schema.
//!
//! Two modes: [`random_value`] draws one conforming value, and
//! [`representative_values`] returns a finite set that covers the edge cases
//! of the outermost layer plus random samples.

use std::collections::BTreeSet;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{CheckedSub, One, Zero};
use rand::Rng;
use schema::{Schema, Value};

/// Bounds for value generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueBounds {
    /// Upper bound (inclusive) for randomly chosen list lengths.
    pub max_list_length: usize,
    /// Random samples added to the UInt edge set.
    pub random_uints: usize,
    /// Random lengths added to the list length edge set.
    pub random_lengths: usize,
    /// Serialized byte budget defining near-limit list lengths.
    pub list_edge_byte_budget: usize,
}

impl ValueBounds {
    /// Bounds that only cap list lengths, for values nested in composites.
    #[must_use]
    pub const fn with_max_list_length(max_list_length: usize) -> Self {
        Self {
            max_list_length,
            random_uints: 0,
            random_lengths: 0,
            list_edge_byte_budget: 0,
        }
    }
}

/// Largest value representable in `bits` bits.
#[must_use]
pub fn uint_max(bits: u16) -> BigUint {
    (BigUint::one() << usize::from(bits)) - 1u8
}

/// Uniform sample in `[0, 2^bits - 1]`.
pub fn random_uint<R: Rng + ?Sized>(bits: u16, rng: &mut R) -> BigUint {
    rng.gen_biguint(u64::from(bits))
}

/// Both boolean values, `true` first.
#[must_use]
pub fn bool_values() -> Vec<Value> {
    vec![Value::Bool(true), Value::Bool(false)]
}

/// `{0, 1, max - 1, max}` followed by `random_count` uniform samples.
///
/// The edge set is ascending and holds only values within `[0, max]`, so
/// widths narrower than two bits yield fewer than four edges.
pub fn uint_edge_values<R: Rng + ?Sized>(
    bits: u16,
    random_count: usize,
    rng: &mut R,
) -> Vec<Value> {
    let max = uint_max(bits);
    let below_max = max.checked_sub(&BigUint::one());
    let edges: BTreeSet<BigUint> = [Some(BigUint::zero()), Some(BigUint::one()), below_max]
        .into_iter()
        .flatten()
        .chain([max.clone()])
        .filter(|value| *value <= max)
        .collect();
    let mut values: Vec<Value> = edges.into_iter().map(Value::uint).collect();
    values.extend((0..random_count).map(|_| Value::uint(random_uint(bits, rng))));
    values
}

/// Near-limit list length `B` for an element schema: the number of elements
/// whose fixed parts fill `byte_budget` bytes.
#[must_use]
pub fn list_boundary_length(element: &Schema, byte_budget: usize) -> usize {
    byte_budget / element.fixed_part_size().max(1)
}

/// `{0, 1, B - 1, B}` followed by `bounds.random_lengths` lengths drawn from
/// `[0, bounds.max_list_length]`.
///
/// The edge part is sorted and deduplicated; a small `B` collapses it.
pub fn list_lengths<R: Rng + ?Sized>(
    element: &Schema,
    bounds: &ValueBounds,
    rng: &mut R,
) -> Vec<usize> {
    let boundary = list_boundary_length(element, bounds.list_edge_byte_budget);
    let edges: BTreeSet<usize> = [0, 1, boundary.saturating_sub(1), boundary].into();
    let mut lengths: Vec<usize> = edges.into_iter().collect();
    lengths.extend((0..bounds.random_lengths).map(|_| rng.gen_range(0..=bounds.max_list_length)));
    lengths
}

/// Draws one value conforming to `schema`.
///
/// Lists pick a length uniformly in `[0, max_list_length]` at every level.
pub fn random_value<R: Rng + ?Sized>(
    schema: &Schema,
    max_list_length: usize,
    rng: &mut R,
) -> Value {
    match schema {
        Schema::Boolean => Value::Bool(rng.gen()),
        Schema::UInt { bits } => Value::uint(random_uint(*bits, rng)),
        Schema::Vector { element, length } => {
            random_elements(element, *length, max_list_length, rng)
        }
        Schema::List { element } => {
            let length = rng.gen_range(0..=max_list_length);
            random_elements(element, length, max_list_length, rng)
        }
        Schema::Container { fields } => Value::Sequence(
            fields
                .iter()
                .map(|field| random_value(field, max_list_length, rng))
                .collect(),
        ),
    }
}

/// Draws exactly `length` values of `element`, in order.
pub fn random_elements<R: Rng + ?Sized>(
    element: &Schema,
    length: usize,
    max_list_length: usize,
    rng: &mut R,
) -> Value {
    Value::Sequence(
        (0..length)
            .map(|_| random_value(element, max_list_length, rng))
            .collect(),
    )
}

/// Returns values covering the edge cases of `schema`'s outermost layer.
///
/// Booleans enumerate both values, UInts use the edge set plus random
/// samples, lists cover every length from [`list_lengths`]. Vectors and
/// containers have no size choice, so they yield one random value.
pub fn representative_values<R: Rng + ?Sized>(
    schema: &Schema,
    bounds: &ValueBounds,
    rng: &mut R,
) -> Vec<Value> {
    match schema {
        Schema::Boolean => bool_values(),
        Schema::UInt { bits } => uint_edge_values(*bits, bounds.random_uints, rng),
        Schema::List { element } => list_lengths(element, bounds, rng)
            .into_iter()
            .map(|length| random_elements(element, length, bounds.max_list_length, rng))
            .collect(),
        Schema::Vector { .. } | Schema::Container { .. } => {
            vec![random_value(schema, bounds.max_list_length, rng)]
        }
    }
}
