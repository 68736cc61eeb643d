//! Document writer and reporting helpers for the `sszgen` binary.
//!
//! The library crates produce [`TestSuite`] values; this crate decides which
//! suites to run, writes them as JSON files and summarizes what was written.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::Pattern;
use schema::{schema_hash, Schema};
use serde::Serialize;
use vectors::{SuiteId, TestSuite, TypeDescriptor};

/// Suites whose id matches `pattern`, in catalog order. `None` selects all.
pub fn select_suites(pattern: Option<&str>) -> Result<Vec<SuiteId>> {
    let Some(pattern) = pattern else {
        return Ok(SuiteId::ALL.to_vec());
    };
    let pattern = Pattern::new(pattern).context("invalid suite pattern")?;
    let selected: Vec<SuiteId> = SuiteId::ALL
        .into_iter()
        .filter(|id| pattern.matches(id.name()))
        .collect();
    if selected.is_empty() {
        bail!("no suite matches {pattern}");
    }
    Ok(selected)
}

/// Rebuilds the schema a type descriptor was rendered from.
pub fn descriptor_schema(descriptor: &TypeDescriptor) -> Result<Schema> {
    Ok(match descriptor {
        TypeDescriptor::Bool => Schema::Boolean,
        TypeDescriptor::UInt(bits) => Schema::uint(*bits)?,
        TypeDescriptor::List(element) => Schema::list(descriptor_schema(element)?),
        TypeDescriptor::Vector(element, length) => {
            Schema::vector(descriptor_schema(element)?, *length)
        }
        TypeDescriptor::Container(fields) => Schema::container(
            fields
                .iter()
                .map(descriptor_schema)
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

/// Number of structurally distinct schemas among a suite's cases.
pub fn distinct_schemas(suite: &TestSuite) -> Result<usize> {
    let mut hashes = HashSet::new();
    for case in &suite.test_cases {
        hashes.insert(schema_hash(&descriptor_schema(case.type_descriptor())?));
    }
    Ok(hashes.len())
}

/// Summary of one written suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub id: &'static str,
    pub path: PathBuf,
    pub cases: usize,
    pub invalid: usize,
    pub distinct_schemas: usize,
    pub digest: String,
}

/// Writes `suite` as `<out_dir>/<id>.json` and reports on it.
pub fn write_suite(out_dir: &Path, id: SuiteId, suite: &TestSuite) -> Result<SuiteReport> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;
    let path = out_dir.join(format!("{}.json", id.name()));
    let json = suite.to_json_pretty().context("serialize suite")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;

    Ok(SuiteReport {
        id: id.name(),
        path,
        cases: suite.test_cases.len(),
        invalid: suite.count_valid(false),
        distinct_schemas: distinct_schemas(suite)?,
        digest: suite.digest().context("digest suite")?,
    })
}
