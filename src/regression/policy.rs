// Selection and classification of a single test case
//
// A report mixes raw repetitions with aggregates (mean, median, stddev...).
// Only two kinds of entries are authoritative:
// - a raw entry with exactly one measurement (single-repetition benchmark)
// - the "mean" aggregate
// Raw entries with several measurements are waiting for their aggregate and
// must not be counted twice.

use crate::regression::config::{IMPROVEMENT_THRESHOLD, MEAN_AGGREGATE, REGRESSION_THRESHOLD};
use crate::report::{ReportError, TestCase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing one time delta against the fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Faster by more than 5%
    Improvement,
    /// Slower by more than 5%
    Regression,
    /// Within the tolerance band, bounds included
    Neutral,
}

impl Classification {
    /// Classify a relative time delta
    ///
    /// ```
    /// use benchgate::regression::Classification;
    ///
    /// assert_eq!(Classification::from_delta(0.1), Classification::Regression);
    /// assert_eq!(Classification::from_delta(0.05), Classification::Neutral);
    /// assert_eq!(Classification::from_delta(-0.06), Classification::Improvement);
    /// ```
    pub fn from_delta(time: f64) -> Self {
        if time < IMPROVEMENT_THRESHOLD {
            Classification::Improvement
        } else if time > REGRESSION_THRESHOLD {
            Classification::Regression
        } else {
            Classification::Neutral
        }
    }

    /// Human-readable notice for a classified test
    pub fn notice(&self, test_name: &str) -> String {
        match self {
            Classification::Improvement => {
                format!("Performance increase detected for test {}", test_name)
            }
            Classification::Regression => {
                format!("Performance decrease detected for test {}", test_name)
            }
            Classification::Neutral => {
                format!("No major performance change detected for test {}", test_name)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Improvement => "improvement",
            Classification::Regression => "regression",
            Classification::Neutral => "neutral",
        }
    }
}

/// Why a test case was left out of the verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Raw entry with several repetitions; its mean aggregate follows
    PendingAggregation { measurements: usize },
    /// Aggregate other than the mean (median, stddev, cv...)
    NonMeanAggregate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PendingAggregation { measurements } => {
                write!(f, "{} repetitions, waiting for aggregate", measurements)
            }
            SkipReason::NonMeanAggregate(label) => write!(f, "ignored aggregate '{}'", label),
        }
    }
}

/// Result of running the policy on one test case
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Classified {
        time: f64,
        classification: Classification,
    },
    Skipped(SkipReason),
}

/// Decide whether `case` takes part in the verdict, without reading its
/// measurements' values
pub fn skip_reason(case: &TestCase) -> Option<SkipReason> {
    if !case.is_aggregate() {
        if case.measurements.len() > 1 {
            return Some(SkipReason::PendingAggregation {
                measurements: case.measurements.len(),
            });
        }
        None
    } else if case.aggregate_name != MEAN_AGGREGATE {
        Some(SkipReason::NonMeanAggregate(case.aggregate_name.clone()))
    } else {
        None
    }
}

/// Select and classify a test case
///
/// Only the first measurement of a selected case is consulted. A selected
/// case without any measurement, or with a non-numeric time, is an error.
pub fn classify(case: &TestCase) -> Result<Selection, ReportError> {
    if let Some(reason) = skip_reason(case) {
        return Ok(Selection::Skipped(reason));
    }

    let first = case
        .measurements
        .first()
        .ok_or_else(|| ReportError::EmptyMeasurements {
            name: case.name.clone(),
        })?;
    let time = first.time_delta(&case.name)?;

    Ok(Selection::Classified {
        time,
        classification: Classification::from_delta(time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Measurement;
    use serde_json::Value;

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(Classification::from_delta(0.05), Classification::Neutral);
        assert_eq!(Classification::from_delta(-0.05), Classification::Neutral);
        assert_eq!(Classification::from_delta(0.0), Classification::Neutral);
        assert_eq!(Classification::from_delta(0.0501), Classification::Regression);
        assert_eq!(Classification::from_delta(-0.0501), Classification::Improvement);
    }

    #[test]
    fn test_nan_delta_is_neutral() {
        assert_eq!(Classification::from_delta(f64::NAN), Classification::Neutral);
    }

    #[test]
    fn test_notices() {
        assert_eq!(
            Classification::Improvement.notice("a"),
            "Performance increase detected for test a"
        );
        assert_eq!(
            Classification::Regression.notice("a"),
            "Performance decrease detected for test a"
        );
        assert_eq!(
            Classification::Neutral.notice("a"),
            "No major performance change detected for test a"
        );
    }

    #[test]
    fn test_single_repetition_is_selected() {
        let case = TestCase::new("raw", "", &[0.2]);
        assert_eq!(
            classify(&case).unwrap(),
            Selection::Classified {
                time: 0.2,
                classification: Classification::Regression
            }
        );
    }

    #[test]
    fn test_multiple_repetitions_wait_for_aggregate() {
        let case = TestCase::new("raw", "", &[0.9, 0.9, 0.9]);
        assert_eq!(
            classify(&case).unwrap(),
            Selection::Skipped(SkipReason::PendingAggregation { measurements: 3 })
        );
    }

    #[test]
    fn test_mean_uses_first_measurement_only() {
        let case = TestCase::new("b", "mean", &[-0.1, 0.2]);
        assert_eq!(
            classify(&case).unwrap(),
            Selection::Classified {
                time: -0.1,
                classification: Classification::Improvement
            }
        );
    }

    #[test]
    fn test_other_aggregates_are_skipped() {
        for label in ["median", "stddev", "cv", "min", "max", "Mean"] {
            let case = TestCase::new("c", label, &[0.5]);
            assert_eq!(
                classify(&case).unwrap(),
                Selection::Skipped(SkipReason::NonMeanAggregate(label.to_string())),
                "aggregate {label} should be skipped"
            );
        }
    }

    #[test]
    fn test_skipped_aggregate_without_measurements_is_not_an_error() {
        let case = TestCase::new("c", "median", &[]);
        assert!(matches!(classify(&case).unwrap(), Selection::Skipped(_)));
    }

    #[test]
    fn test_selected_case_without_measurements_is_an_error() {
        let raw = TestCase::new("raw", "", &[]);
        let mean = TestCase::new("mean", "mean", &[]);

        assert!(matches!(
            classify(&raw),
            Err(ReportError::EmptyMeasurements { ref name }) if name == "raw"
        ));
        assert!(matches!(
            classify(&mean),
            Err(ReportError::EmptyMeasurements { ref name }) if name == "mean"
        ));
    }

    #[test]
    fn test_invalid_time_on_selected_case() {
        let case = TestCase {
            name: "bad".to_string(),
            aggregate_name: String::new(),
            measurements: vec![Measurement {
                time: Value::from("n/a"),
            }],
        };
        assert!(matches!(classify(&case), Err(ReportError::InvalidTime { .. })));
    }

    #[test]
    fn test_skipped_case_time_is_never_read() {
        for time in [Value::Null, Value::from("n/a"), Value::Bool(true)] {
            let case = TestCase {
                name: "c".to_string(),
                aggregate_name: "median".to_string(),
                measurements: vec![Measurement { time }],
            };
            assert!(matches!(classify(&case).unwrap(), Selection::Skipped(_)));
        }
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::PendingAggregation { measurements: 2 }.to_string(),
            "2 repetitions, waiting for aggregate"
        );
        assert_eq!(
            SkipReason::NonMeanAggregate("median".to_string()).to_string(),
            "ignored aggregate 'median'"
        );
    }
}
