//! Malformed serials and out-of-domain values.
//!
//! Nothing here goes through the codec: wrong-length and invalid-byte serials
//! are built directly, and out-of-range integers are recorded at the value
//! level only because no encoding of them exists.

use std::collections::{BTreeSet, HashSet};

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand::Rng;
use schema::{Schema, Value};

use crate::error::VectorResult;
use crate::render::TestCase;
use crate::value_gen::uint_max;

/// Single-byte values that are neither `0x00` nor `0x01`.
pub const INVALID_BOOL_BYTES: std::ops::RangeInclusive<u8> = 2..=254;

/// Constant fills tried at every wrong length before the random ones.
const CONSTANT_FILLS: [u8; 3] = [0x00, 0x01, 0xFF];

/// Two-byte patterns repeated to fill a wrong length after the constant fills.
const MIXED_FILLS: [[u8; 2]; 2] = [[0x00, 0x01], [0x01, 0xFF]];

/// Lengths `{0, L/2, L-1, L+1, 2L}`, sorted and deduplicated.
///
/// `L` itself never appears, so every returned length is wrong.
#[must_use]
pub fn wrong_lengths(fixed_len: usize) -> Vec<usize> {
    let lengths: BTreeSet<usize> = [
        0,
        fixed_len / 2,
        fixed_len.saturating_sub(1),
        fixed_len + 1,
        fixed_len * 2,
    ]
    .into_iter()
    .filter(|&len| len != fixed_len)
    .collect();
    lengths.into_iter().collect()
}

/// Byte strings of every wrong length for `fixed_len`.
///
/// Each length gets the constant fills, the repeated mixed patterns, then
/// `repetitions` random fills; duplicates within a length are dropped, so the
/// empty length yields a single serial.
pub fn wrong_length_serials<R: Rng + ?Sized>(
    fixed_len: usize,
    repetitions: usize,
    rng: &mut R,
) -> Vec<Vec<u8>> {
    let mut serials = Vec::new();
    for length in wrong_lengths(fixed_len) {
        let mut seen = HashSet::new();
        let constant = CONSTANT_FILLS.iter().map(|&byte| vec![byte; length]);
        let mixed = MIXED_FILLS
            .iter()
            .map(|pattern| pattern.iter().copied().cycle().take(length).collect::<Vec<u8>>());
        let random: Vec<Vec<u8>> = (0..repetitions)
            .map(|_| (0..length).map(|_| rng.gen()).collect())
            .collect();
        for serial in constant.chain(mixed).chain(random) {
            if seen.insert(serial.clone()) {
                serials.push(serial);
            }
        }
    }
    serials
}

/// Invalid cases whose serial has the wrong length for `schema`.
///
/// Schemas without a fixed size have no wrong length and yield no cases.
pub fn wrong_length_cases<R: Rng + ?Sized>(
    schema: &Schema,
    tags: &[&str],
    repetitions: usize,
    rng: &mut R,
) -> VectorResult<Vec<TestCase>> {
    let Some(fixed_len) = schema.fixed_size() else {
        return Ok(Vec::new());
    };

    wrong_length_serials(fixed_len, repetitions, rng)
        .into_iter()
        .map(|serial| {
            TestCase::builder(schema, false)
                .serial(serial)
                .tags(tags)
                .build()
        })
        .collect()
}

/// One invalid case per byte in [`INVALID_BOOL_BYTES`].
pub fn bool_invalid_byte_cases(tags: &[&str]) -> VectorResult<Vec<TestCase>> {
    let schema = Schema::Boolean;
    INVALID_BOOL_BYTES
        .map(|byte| {
            TestCase::builder(&schema, false)
                .serial(vec![byte])
                .tags(tags)
                .build()
        })
        .collect()
}

/// Values just outside `[0, 2^bits - 1]`: `-1` tagged `uint_underflow` and
/// `2^bits` tagged `uint_overflow`. Neither carries a serial.
pub fn uint_out_of_bounds_cases(bits: u16, common_tags: &[&str]) -> VectorResult<Vec<TestCase>> {
    let schema = Schema::UInt { bits };
    let overflow = BigInt::from(uint_max(bits) + BigUint::one());
    [(BigInt::from(-1), "uint_underflow"), (overflow, "uint_overflow")]
        .into_iter()
        .map(|(value, tag)| {
            TestCase::builder(&schema, false)
                .value(&Value::Integer(value))
                .tags(common_tags.iter().copied().chain([tag]))
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinism::seeded_rng;
    use crate::render::RenderedValue;

    #[test]
    fn wrong_lengths_for_common_sizes() {
        assert_eq!(wrong_lengths(1), vec![0, 2]);
        assert_eq!(wrong_lengths(2), vec![0, 1, 3, 4]);
        assert_eq!(wrong_lengths(4), vec![0, 2, 3, 5, 8]);
        assert_eq!(wrong_lengths(32), vec![0, 16, 31, 33, 64]);
    }

    #[test]
    fn wrong_lengths_never_include_fixed_length() {
        for len in 1..100 {
            assert!(!wrong_lengths(len).contains(&len));
        }
    }

    #[test]
    fn serials_have_wrong_lengths_and_are_distinct_per_length() {
        let mut rng = seeded_rng(0);
        let serials = wrong_length_serials(8, 3, &mut rng);
        let allowed = wrong_lengths(8);
        assert!(serials.iter().all(|s| allowed.contains(&s.len())));

        let unique: HashSet<&Vec<u8>> = serials.iter().collect();
        assert_eq!(unique.len(), serials.len());

        // The empty length collapses to a single serial.
        assert_eq!(serials.iter().filter(|s| s.is_empty()).count(), 1);
        assert!(serials.contains(&vec![0xFF; 16]));
        assert!(serials.contains(&vec![0x01; 7]));
    }

    #[test]
    fn mixed_fills_follow_constant_fills() {
        let mut rng = seeded_rng(3);
        let serials = wrong_length_serials(1, 0, &mut rng);
        assert_eq!(
            serials,
            vec![
                vec![],
                vec![0x00, 0x00],
                vec![0x01, 0x01],
                vec![0xFF, 0xFF],
                vec![0x00, 0x01],
                vec![0x01, 0xFF],
            ]
        );

        let serials = wrong_length_serials(2, 0, &mut rng);
        assert!(serials.contains(&vec![0x00, 0x01, 0x00]));
        assert!(serials.contains(&vec![0x01, 0xFF, 0x01, 0xFF]));
        // Single-byte mixed fills repeat a constant fill and are dropped.
        assert_eq!(serials.iter().filter(|s| s.len() == 1).count(), 3);
    }

    #[test]
    fn uint16_wrong_length_examples() {
        let mut rng = seeded_rng(1);
        let schema = Schema::UInt { bits: 16 };
        let cases = wrong_length_cases(&schema, &["atomic", "uint", "wrong_length"], 2, &mut rng).unwrap();

        let too_short = cases.iter().find(|c| c.serial().map(<[u8]>::len) == Some(1));
        let too_long = cases.iter().find(|c| c.serial().map(<[u8]>::len) == Some(4));
        for case in [too_short, too_long] {
            let case = case.expect("missing wrong-length case");
            assert!(!case.is_valid());
            assert!(case.value().is_none());
            assert!(case.has_tag("wrong_length"));
        }
    }

    #[test]
    fn variable_size_schema_has_no_wrong_length() {
        let mut rng = seeded_rng(2);
        let schema = Schema::list(Schema::Boolean);
        assert!(wrong_length_cases(&schema, &[], 3, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn invalid_bool_bytes_exclude_valid_encodings() {
        let cases = bool_invalid_byte_cases(&["atomic", "bool", "invalid"]).unwrap();
        assert_eq!(cases.len(), 253);

        let bytes: Vec<u8> = cases.iter().map(|c| c.serial().unwrap()[0]).collect();
        assert_eq!(bytes.first(), Some(&2));
        assert_eq!(bytes.last(), Some(&254));
        assert!(!bytes.contains(&0x00));
        assert!(!bytes.contains(&0x01));
        assert!(cases.iter().all(|c| c.serial().unwrap().len() == 1 && !c.is_valid()));
    }

    #[test]
    fn out_of_bounds_values() {
        let cases = uint_out_of_bounds_cases(8, &["atomic", "uint"]).unwrap();
        assert_eq!(cases.len(), 2);

        assert_eq!(cases[0].value(), Some(&RenderedValue::Decimal("-1".into())));
        assert_eq!(cases[0].tags(), ["atomic", "uint", "uint_underflow"]);
        assert_eq!(cases[1].value(), Some(&RenderedValue::Decimal("256".into())));
        assert_eq!(cases[1].tags(), ["atomic", "uint", "uint_overflow"]);
        assert!(cases.iter().all(|c| c.serial().is_none() && !c.is_valid()));
    }

    #[test]
    fn overflow_for_widest_uint() {
        let cases = uint_out_of_bounds_cases(512, &[]).unwrap();
        let expected = (BigUint::from(1u8) << 512usize).to_string();
        assert_eq!(cases[1].value(), Some(&RenderedValue::Decimal(expected)));
    }
}
