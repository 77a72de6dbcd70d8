// Regression verdict for a full comparison report
//
// Scans the report in document order, runs the selection policy on every
// test case and aggregates improvement/regression counts into a verdict
// and a process exit status.

use crate::regression::config::RegressionConfig;
use crate::regression::policy::{classify, Classification, Selection};
use crate::report::{Report, ReportError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exit status when no regression was found
pub const EXIT_NO_REGRESSION: u8 = 0;

/// Exit status when at least one test regressed beyond the threshold
pub const EXIT_REGRESSION: u8 = 2;

/// Final verdict of a report evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionVerdict {
    /// Neither improvements nor regressions
    NoChange,

    /// Improvements only
    Improved,

    /// At least one regression
    Regression,
}

impl RegressionVerdict {
    pub fn exit_code(&self) -> u8 {
        match self {
            RegressionVerdict::NoChange | RegressionVerdict::Improved => EXIT_NO_REGRESSION,
            RegressionVerdict::Regression => EXIT_REGRESSION,
        }
    }
}

/// A classified (selected) test case
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub name: String,
    pub aggregate_name: String,
    pub time: f64,
    pub classification: Classification,
}

impl CaseOutcome {
    pub fn notice(&self) -> String {
        self.classification.notice(&self.name)
    }
}

/// Detailed result of a report evaluation
#[derive(Debug, Clone)]
pub struct RegressionAssessment {
    /// Classified test cases, in document order
    pub outcomes: Vec<CaseOutcome>,

    /// Number of test cases left out by the selection policy
    pub skipped: usize,

    /// True when fail-fast mode stopped before the end of the report
    pub stopped_early: bool,

    /// Configuration used for the evaluation
    pub config: RegressionConfig,
}

impl RegressionAssessment {
    fn count(&self, classification: Classification) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.classification == classification)
            .count()
    }

    /// Number of tests with improved performance
    pub fn increase(&self) -> usize {
        self.count(Classification::Improvement)
    }

    /// Number of tests with a performance decrease
    pub fn decrease(&self) -> usize {
        self.count(Classification::Regression)
    }

    pub fn neutral(&self) -> usize {
        self.count(Classification::Neutral)
    }

    pub fn verdict(&self) -> RegressionVerdict {
        if self.decrease() > 0 {
            RegressionVerdict::Regression
        } else if self.increase() > 0 {
            RegressionVerdict::Improved
        } else {
            RegressionVerdict::NoChange
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict().exit_code()
    }

    /// Per-test notices, in document order
    pub fn notices(&self) -> impl Iterator<Item = String> + '_ {
        self.outcomes.iter().map(CaseOutcome::notice)
    }

    /// One-line summary printed on stdout
    pub fn summary_line(&self) -> String {
        match self.verdict() {
            RegressionVerdict::NoChange => "No performance change".to_string(),
            RegressionVerdict::Improved | RegressionVerdict::Regression => format!(
                "{} tests with improved performance ; {} with performance decrease",
                self.increase(),
                self.decrease()
            ),
        }
    }

    /// Notices followed by the summary line
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        for notice in self.notices() {
            report.push_str(&notice);
            report.push('\n');
        }
        report.push_str(&self.summary_line());
        report.push('\n');
        report
    }
}

/// Evaluate an in-memory report
///
/// # Example
/// ```
/// use benchgate::regression::{assess_regression, RegressionConfig, RegressionVerdict};
/// use benchgate::report::{Report, TestCase};
///
/// let report = Report::new(vec![TestCase::new("a", "", &[0.1])]);
/// let assessment = assess_regression(&report, &RegressionConfig::default()).unwrap();
/// assert_eq!(assessment.verdict(), RegressionVerdict::Regression);
/// assert_eq!(assessment.exit_code(), 2);
/// ```
pub fn assess_regression(
    report: &Report,
    config: &RegressionConfig,
) -> Result<RegressionAssessment, ReportError> {
    let mut outcomes = Vec::new();
    let mut skipped = 0;
    let mut stopped_early = false;

    for (index, case) in report.iter().enumerate() {
        match classify(case)? {
            Selection::Skipped(reason) => {
                tracing::debug!(test = %case.name, %reason, "skipping test case");
                skipped += 1;
            }
            Selection::Classified {
                time,
                classification,
            } => {
                tracing::trace!(
                    test = %case.name,
                    time,
                    classification = classification.as_str(),
                    "classified test case"
                );
                outcomes.push(CaseOutcome {
                    name: case.name.clone(),
                    aggregate_name: case.aggregate_name.clone(),
                    time,
                    classification,
                });

                if classification == Classification::Regression
                    && config.stops_at_first_regression()
                {
                    stopped_early = index + 1 < report.len();
                    tracing::debug!(
                        test = %case.name,
                        remaining = report.len() - index - 1,
                        "fail-fast: stopping at first regression"
                    );
                    break;
                }
            }
        }
    }

    Ok(RegressionAssessment {
        outcomes,
        skipped,
        stopped_early,
        config: config.clone(),
    })
}

/// Load the report at `path` and evaluate it
pub fn evaluate(path: &Path, config: &RegressionConfig) -> Result<RegressionAssessment, ReportError> {
    let report = Report::load(path)?;
    assess_regression(&report, config)
}
