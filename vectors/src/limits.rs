//! Bounds that control how many and how large generated cases are.

use crate::error::{VectorError, VectorResult};

/// Generation bounds for every suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenLimits {
    /// Random values added to the UInt edge set in the basic UInt suite.
    pub uint_random_values: usize,
    /// Random values per width in the UInt Random suite.
    pub uint_random_cases_per_width: usize,
    /// Random-content serials per length in wrong-length suites.
    pub wrong_length_repetitions: usize,

    /// Random lengths added to the edge lengths in flat suites.
    pub flat_random_lengths: usize,
    pub flat_max_list_length: usize,
    pub flat_max_vector_length: usize,
    pub flat_max_container_length: usize,
    /// Serialized byte budget that defines the near-limit list lengths.
    pub list_edge_byte_budget: usize,

    /// Cases per outer/inner composite pairing in shallow nesting.
    pub nested_cases_per_pairing: usize,
    pub nested_max_list_length: usize,
    pub nested_max_vector_length: usize,
    pub nested_max_container_length: usize,

    /// Cases in the deep nesting suite.
    pub deep_cases: usize,
    /// Width cap for every composite level in deep nesting.
    pub deep_max_width: usize,
    /// Expected number of layers along one branch.
    pub deep_expected_branch_length: u32,
    /// Hard cap on schema depth in deep nesting.
    pub deep_max_depth: usize,
}

impl Default for GenLimits {
    fn default() -> Self {
        Self {
            uint_random_values: 16,
            uint_random_cases_per_width: 10,
            wrong_length_repetitions: 3,

            flat_random_lengths: 16,
            flat_max_list_length: 512,
            flat_max_vector_length: 512,
            flat_max_container_length: 32,
            list_edge_byte_budget: 256,

            nested_cases_per_pairing: 20,
            nested_max_list_length: 16,
            nested_max_vector_length: 16,
            nested_max_container_length: 16,

            deep_cases: 20,
            deep_max_width: 4,
            deep_expected_branch_length: 4,
            deep_max_depth: 12,
        }
    }
}

impl GenLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            uint_random_values: 2,
            uint_random_cases_per_width: 2,
            wrong_length_repetitions: 1,

            flat_random_lengths: 2,
            flat_max_list_length: 8,
            flat_max_vector_length: 8,
            flat_max_container_length: 4,
            list_edge_byte_budget: 16,

            nested_cases_per_pairing: 2,
            nested_max_list_length: 3,
            nested_max_vector_length: 3,
            nested_max_container_length: 3,

            deep_cases: 4,
            deep_max_width: 3,
            deep_expected_branch_length: 3,
            deep_max_depth: 6,
        }
    }

    /// Checks that the limits describe a terminating generation.
    pub const fn validate(&self) -> VectorResult<()> {
        if self.deep_expected_branch_length == 0 {
            return Err(VectorError::InvalidLimits {
                reason: "deep_expected_branch_length must be at least 1",
            });
        }
        if self.deep_max_depth == 0 {
            return Err(VectorError::InvalidLimits {
                reason: "deep_max_depth must be at least 1",
            });
        }
        Ok(())
    }

    /// Probability of adding one more composite layer in deep nesting.
    #[must_use]
    pub fn deep_continue_probability(&self) -> f64 {
        1.0 - 1.0 / f64::from(self.deep_expected_branch_length.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_valid() {
        assert!(GenLimits::default().validate().is_ok());
        assert!(GenLimits::for_testing().validate().is_ok());
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = GenLimits::for_testing();
        let default_limits = GenLimits::default();
        assert!(test_limits.flat_max_list_length < default_limits.flat_max_list_length);
        assert!(test_limits.deep_cases < default_limits.deep_cases);
    }

    #[test]
    fn continue_probability_from_expected_length() {
        let limits = GenLimits::default();
        assert!((limits.deep_continue_probability() - 0.75).abs() < f64::EPSILON);

        let limits = GenLimits {
            deep_expected_branch_length: 1,
            ..GenLimits::default()
        };
        assert!(limits.deep_continue_probability().abs() < f64::EPSILON);
    }

    #[test]
    fn zero_branch_length_rejected() {
        let limits = GenLimits {
            deep_expected_branch_length: 0,
            ..GenLimits::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(VectorError::InvalidLimits { .. })
        ));
    }

    #[test]
    fn zero_depth_rejected() {
        let limits = GenLimits {
            deep_max_depth: 0,
            ..GenLimits::default()
        };
        assert!(limits.validate().is_err());
    }
}
