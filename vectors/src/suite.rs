//! Titled, versioned groups of test cases.

use std::fmt;

use serde::Serialize;

use crate::error::VectorResult;
use crate::render::TestCase;

/// Release tag of a suite document, emitted as a `version` or `fork` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Release {
    Version(String),
    Fork(String),
}

impl Release {
    #[must_use]
    pub fn version(version: impl Into<String>) -> Self {
        Self::Version(version.into())
    }

    #[must_use]
    pub fn fork(fork: impl Into<String>) -> Self {
        Self::Fork(fork.into())
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(version) => write!(f, "version {version}"),
            Self::Fork(fork) => write!(f, "fork {fork}"),
        }
    }
}

/// A suite document. Test cases stay in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSuite {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub release: Release,
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    #[must_use]
    pub fn new(title: impl Into<String>, release: Release, test_cases: Vec<TestCase>) -> Self {
        Self {
            title: title.into(),
            summary: None,
            release,
            test_cases,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Number of cases with the given validity.
    #[must_use]
    pub fn count_valid(&self, valid: bool) -> usize {
        self.test_cases
            .iter()
            .filter(|case| case.is_valid() == valid)
            .count()
    }

    /// Compact JSON encoding of the document.
    pub fn to_json(&self) -> VectorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON encoding of the document.
    pub fn to_json_pretty(&self) -> VectorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Hex blake3 digest of [`Self::to_json`]. Two suites generated with the
    /// same seed and limits have the same digest.
    pub fn digest(&self) -> VectorResult<String> {
        let json = self.to_json()?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
