//! Benchmark comparison report model
//!
//! A report is the JSON array emitted by a benchmark comparison harness
//! (e.g. Google Benchmark's `compare.py --dump_to_json`). Each element is a
//! test case carrying one or more relative time deltas. Only the fields
//! needed for the regression gate are modeled; everything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or interpreting a comparison report
///
/// Every variant is fatal for the gate: a malformed report must never be
/// treated as "no regression".
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read report {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse report {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("test {name}: time value {value} is not a floating-point number")]
    InvalidTime { name: String, value: String },

    #[error("test {name}: no measurements to classify")]
    EmptyMeasurements { name: String },
}

/// A single comparison measurement
///
/// `time` is kept as raw JSON and only interpreted when the owning test case
/// is selected, so an odd value on an ignored aggregate never fails the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Fractional change between candidate and baseline (0.05 == +5%, slower)
    #[serde(default)]
    pub time: Value,
}

impl Measurement {
    pub fn from_delta(time: f64) -> Self {
        Self {
            time: Value::from(time),
        }
    }

    /// Resolve the time delta to a float
    ///
    /// Accepts a JSON number or a string holding a float literal. `case_name`
    /// is only used to label the error.
    pub fn time_delta(&self, case_name: &str) -> Result<f64, ReportError> {
        let parsed = match &self.time {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ReportError::InvalidTime {
            name: case_name.to_string(),
            value: self.time.to_string(),
        })
    }
}

/// One benchmark entry of the comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Benchmark name (e.g. "BM_MediaRequests/ListAll")
    pub name: String,

    /// Aggregate label; empty for a raw single-repetition result
    pub aggregate_name: String,

    /// Comparison measurements, first entry is authoritative
    pub measurements: Vec<Measurement>,
}

impl TestCase {
    /// Build a test case with one measurement per delta
    pub fn new(
        name: impl Into<String>,
        aggregate_name: impl Into<String>,
        deltas: &[f64],
    ) -> Self {
        Self {
            name: name.into(),
            aggregate_name: aggregate_name.into(),
            measurements: deltas
                .iter()
                .copied()
                .map(Measurement::from_delta)
                .collect(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        !self.aggregate_name.is_empty()
    }
}

/// A full comparison report, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub cases: Vec<TestCase>,
}

impl Report {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    /// Parse a report from its JSON text
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Parse a report from raw bytes
    pub fn from_slice(input: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(input)
    }

    /// Read and parse the report stored at `path`
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let data = fs::read(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let report = Self::from_slice(&data).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            cases = report.len(),
            "loaded comparison report"
        );
        Ok(report)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}
