//! The suite catalog and the generator that runs it.

use std::fmt;

use codec::{Codec, SszCodec};
use rand::Rng;
use schema::{Schema, Value, BASIC_UINT_BITS, UINT_BITS};
use tracing::debug;

use crate::boundary::{bool_invalid_byte_cases, uint_out_of_bounds_cases, wrong_length_cases};
use crate::determinism::{seeded_rng, with_seed, SuiteRng};
use crate::error::VectorResult;
use crate::limits::GenLimits;
use crate::render::TestCase;
use crate::schema_gen::{
    basic_schemas, deep_nested_schema, random_basic_schema, shallow_nested_schemas,
};
use crate::suite::{Release, TestSuite};
use crate::value_gen::{
    bool_values, random_uint, random_value, representative_values, uint_edge_values, uint_max,
    ValueBounds,
};

const LEGACY_VERSION: &str = "0.1";
const ATOMIC_FORK: &str = "phase0-0.2.0";

/// Identifies one top-level suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteId {
    UInt,
    Bool,
    BoolValues,
    BoolWrongLength,
    BoolInvalidByte,
    UIntBounds,
    UIntRandom,
    UIntWrongLength,
    FlatList,
    FlatContainer,
    FlatVector,
    NestedShallow,
    NestedDeep,
}

impl SuiteId {
    pub const ALL: [Self; 13] = [
        Self::UInt,
        Self::Bool,
        Self::BoolValues,
        Self::BoolWrongLength,
        Self::BoolInvalidByte,
        Self::UIntBounds,
        Self::UIntRandom,
        Self::UIntWrongLength,
        Self::FlatList,
        Self::FlatContainer,
        Self::FlatVector,
        Self::NestedShallow,
        Self::NestedDeep,
    ];

    /// Stable identifier, also used as the output file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UInt => "uint",
            Self::Bool => "bool",
            Self::BoolValues => "bool_values",
            Self::BoolWrongLength => "bool_wrong_length",
            Self::BoolInvalidByte => "bool_invalid_byte",
            Self::UIntBounds => "uint_bounds",
            Self::UIntRandom => "uint_random",
            Self::UIntWrongLength => "uint_wrong_length",
            Self::FlatList => "flat_list",
            Self::FlatContainer => "flat_container",
            Self::FlatVector => "flat_vector",
            Self::NestedShallow => "nested_shallow",
            Self::NestedDeep => "nested_deep",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::UInt => "UInt",
            Self::Bool => "Bool",
            Self::BoolValues => "Bool Values",
            Self::BoolWrongLength => "Bool Wrong Length",
            Self::BoolInvalidByte => "Bool Invalid Byte",
            Self::UIntBounds => "UInt Bounds",
            Self::UIntRandom => "UInt Random",
            Self::UIntWrongLength => "UInt Wrong Length",
            Self::FlatList => "Flat List",
            Self::FlatContainer => "Flat Container",
            Self::FlatVector => "Flat Vector",
            Self::NestedShallow => "Nested composite types",
            Self::NestedDeep => "Deeply nested composite types",
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::UInt => "UInt tests for all sizes",
            Self::Bool => "Tests for the two bool values",
            Self::BoolValues => "The two valid values for a boolean",
            Self::BoolWrongLength => "Byte strings of incorrect length",
            Self::BoolInvalidByte => "Single byte values that are not 0x00 or 0x01",
            Self::UIntBounds => "Integers right at or beyond the bounds of the allowed value range",
            Self::UIntRandom => "Random integers chosen uniformly over the allowed value range",
            Self::UIntWrongLength => "Serialized integers that are too short or too long",
            Self::FlatList => "Tests for lists of basic types",
            Self::FlatContainer => "Tests for containers consisting of only basic types",
            Self::FlatVector => "Tests for vectors of basic types",
            Self::NestedShallow => "Tests for composite types of other composite types",
            Self::NestedDeep => "Tests for nested composite types with a random number of layers",
        }
    }

    /// Atomic suites carry a fork tag, the rest a format version.
    #[must_use]
    pub fn release(self) -> Release {
        match self {
            Self::BoolValues
            | Self::BoolWrongLength
            | Self::BoolInvalidByte
            | Self::UIntBounds
            | Self::UIntRandom
            | Self::UIntWrongLength => Release::fork(ATOMIC_FORK),
            _ => Release::version(LEGACY_VERSION),
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runs catalog suites with a codec, limits and an owned random source.
///
/// Every call to [`Generator::generate`] reseeds the random source for the
/// duration of the suite and restores it afterwards, so the output depends
/// only on the suite id, the seed and the limits.
#[derive(Debug, Clone)]
pub struct Generator<C = SszCodec> {
    codec: C,
    limits: GenLimits,
    rng: SuiteRng,
}

impl Generator<SszCodec> {
    /// Creates a generator backed by the reference SSZ codec.
    pub fn new(limits: GenLimits) -> VectorResult<Self> {
        Self::with_codec(SszCodec::new(), limits)
    }
}

impl<C: Codec> Generator<C> {
    pub fn with_codec(codec: C, limits: GenLimits) -> VectorResult<Self> {
        limits.validate()?;
        Ok(Self {
            codec,
            limits,
            rng: seeded_rng(0),
        })
    }

    #[must_use]
    pub const fn limits(&self) -> &GenLimits {
        &self.limits
    }

    /// The random source outside of any suite scope.
    #[must_use]
    pub const fn rng(&self) -> &SuiteRng {
        &self.rng
    }

    /// Generates one suite under `seed`.
    ///
    /// The first failing case aborts the whole suite.
    pub fn generate(&mut self, id: SuiteId, seed: u64) -> VectorResult<TestSuite> {
        let Self { codec, limits, rng } = self;
        let (codec, limits) = (&*codec, &*limits);
        let test_cases = with_seed(rng, seed, |rng| build_cases(id, codec, limits, rng))?;

        let suite = TestSuite::new(id.title(), id.release(), test_cases).with_summary(id.summary());
        debug!(
            suite = id.name(),
            seed,
            cases = suite.test_cases.len(),
            invalid = suite.count_valid(false),
            "generated suite"
        );
        Ok(suite)
    }
}

fn build_cases<C: Codec>(
    id: SuiteId,
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    match id {
        SuiteId::UInt => uint_cases(codec, limits, rng),
        SuiteId::Bool => bool_cases(codec),
        SuiteId::BoolValues => bool_value_cases(codec),
        SuiteId::BoolWrongLength => wrong_length_cases(
            &Schema::Boolean,
            &["atomic", "bool", "wrong_length"],
            limits.wrong_length_repetitions,
            rng,
        ),
        SuiteId::BoolInvalidByte => bool_invalid_byte_cases(&["atomic", "bool", "invalid"]),
        SuiteId::UIntBounds => uint_bounds_cases(codec),
        SuiteId::UIntRandom => uint_random_cases(codec, limits, rng),
        SuiteId::UIntWrongLength => uint_wrong_length_cases(limits, rng),
        SuiteId::FlatList => flat_list_cases(codec, limits, rng),
        SuiteId::FlatContainer => flat_container_cases(codec, limits, rng),
        SuiteId::FlatVector => flat_vector_cases(codec, limits, rng),
        SuiteId::NestedShallow => nested_shallow_cases(codec, limits, rng),
        SuiteId::NestedDeep => nested_deep_cases(codec, limits, rng),
    }
}

/// Encodes `value` and builds a valid case from it.
pub fn valid_case<C: Codec + ?Sized>(
    codec: &C,
    schema: &Schema,
    value: &Value,
    tags: &[&str],
) -> VectorResult<TestCase> {
    let serial = codec.encode(value, schema)?;
    TestCase::builder(schema, true)
        .value(value)
        .serial(serial)
        .tags(tags)
        .build()
}

fn uint_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    for &bits in BASIC_UINT_BITS {
        let schema = Schema::UInt { bits };
        for value in uint_edge_values(bits, limits.uint_random_values, rng) {
            cases.push(valid_case(codec, &schema, &value, &["basic", "uint"])?);
        }
    }
    Ok(cases)
}

fn bool_cases<C: Codec>(codec: &C) -> VectorResult<Vec<TestCase>> {
    bool_values()
        .iter()
        .map(|value| valid_case(codec, &Schema::Boolean, value, &["basic", "bool"]))
        .collect()
}

fn bool_value_cases<C: Codec>(codec: &C) -> VectorResult<Vec<TestCase>> {
    [(true, "true"), (false, "false")]
        .into_iter()
        .map(|(value, tag)| {
            let tags = ["atomic", "bool", tag];
            valid_case(codec, &Schema::Boolean, &Value::Bool(value), &tags)
        })
        .collect()
}

fn uint_bounds_cases<C: Codec>(codec: &C) -> VectorResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    for &bits in UINT_BITS {
        let schema = Schema::UInt { bits };
        let bounds = [
            (Value::int(0), "uint_lower_bound"),
            (Value::uint(uint_max(bits)), "uint_upper_bound"),
        ];
        for (value, tag) in bounds {
            cases.push(valid_case(codec, &schema, &value, &["atomic", "uint", tag])?);
        }
    }
    for &bits in UINT_BITS {
        cases.extend(uint_out_of_bounds_cases(bits, &["atomic", "uint"])?);
    }
    Ok(cases)
}

fn uint_random_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    for &bits in UINT_BITS {
        let schema = Schema::UInt { bits };
        for _ in 0..limits.uint_random_cases_per_width {
            let value = Value::uint(random_uint(bits, rng));
            cases.push(valid_case(codec, &schema, &value, &["atomic", "uint", "random"])?);
        }
    }
    Ok(cases)
}

fn uint_wrong_length_cases(limits: &GenLimits, rng: &mut SuiteRng) -> VectorResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    for &bits in UINT_BITS {
        cases.extend(wrong_length_cases(
            &Schema::UInt { bits },
            &["atomic", "uint", "wrong_length"],
            limits.wrong_length_repetitions,
            rng,
        )?);
    }
    Ok(cases)
}

/// `{0, 1}` followed by `count` lengths drawn from `[0, max]`.
fn short_then_random_lengths<R: Rng + ?Sized>(count: usize, max: usize, rng: &mut R) -> Vec<usize> {
    let mut lengths = vec![0, 1];
    lengths.extend((0..count).map(|_| rng.gen_range(0..=max)));
    lengths
}

fn flat_list_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    let bounds = ValueBounds {
        max_list_length: limits.flat_max_list_length,
        random_uints: 0,
        random_lengths: limits.flat_random_lengths,
        list_edge_byte_budget: limits.list_edge_byte_budget,
    };

    let mut cases = Vec::new();
    for element in basic_schemas() {
        let schema = Schema::list(element);
        for value in representative_values(&schema, &bounds, rng) {
            cases.push(valid_case(codec, &schema, &value, &["composite", "list", "flat"])?);
        }
    }
    Ok(cases)
}

fn flat_container_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    let homogenous = ["composite", "container", "flat", "homogenous"];
    for element in basic_schemas() {
        let lengths = short_then_random_lengths(
            limits.flat_random_lengths,
            limits.flat_max_container_length,
            rng,
        );
        for length in lengths {
            let schema = Schema::container(vec![element.clone(); length]);
            let value = random_value(&schema, 0, rng);
            cases.push(valid_case(codec, &schema, &value, &homogenous)?);
        }
    }

    let heterogenous = ["composite", "container", "flat", "heterogenous"];
    let lengths: Vec<usize> = (0..limits.flat_random_lengths)
        .map(|_| rng.gen_range(0..=limits.flat_max_container_length))
        .collect();
    for length in lengths {
        let fields = (0..length).map(|_| random_basic_schema(rng)).collect();
        let schema = Schema::container(fields);
        let value = random_value(&schema, 0, rng);
        cases.push(valid_case(codec, &schema, &value, &heterogenous)?);
    }
    Ok(cases)
}

fn flat_vector_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    let tags = ["composite", "vector", "flat", "homogenous"];
    let mut cases = Vec::new();
    for element in basic_schemas() {
        let lengths =
            short_then_random_lengths(limits.flat_random_lengths, limits.flat_max_vector_length, rng);
        for length in lengths {
            let schema = Schema::vector(element.clone(), length);
            let value = random_value(&schema, 0, rng);
            cases.push(valid_case(codec, &schema, &value, &tags)?);
        }
    }
    Ok(cases)
}

fn nested_shallow_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    shallow_nested_schemas(limits, rng)
        .into_iter()
        .map(|shallow| {
            let value = random_value(&shallow.schema, limits.nested_max_list_length, rng);
            let pairing = shallow.pairing_tag();
            valid_case(
                codec,
                &shallow.schema,
                &value,
                &["composite", "nested", "shallow", pairing.as_str()],
            )
        })
        .collect()
}

fn nested_deep_cases<C: Codec>(
    codec: &C,
    limits: &GenLimits,
    rng: &mut SuiteRng,
) -> VectorResult<Vec<TestCase>> {
    (0..limits.deep_cases)
        .map(|_| {
            let schema = deep_nested_schema(limits, rng);
            let value = random_value(&schema, limits.deep_max_width, rng);
            valid_case(codec, &schema, &value, &["composite", "nested", "deep"])
        })
        .collect()
}
