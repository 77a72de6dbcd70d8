//! JSON output format for the regression verdict
//!
//! `--format json` replaces the one-line text summary on stdout with a
//! machine-readable document. Per-test notices still go to stderr.

use crate::regression::{Classification, RegressionAssessment, RegressionVerdict};
use serde::{Deserialize, Serialize};

/// Format identifier embedded in every document
pub const JSON_FORMAT: &str = "benchgate-json-v1";

/// A classified test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCase {
    pub name: String,
    /// Empty for single-repetition results
    pub aggregate_name: String,
    /// Relative time delta of the first measurement
    pub time: f64,
    pub classification: Classification,
}

/// Aggregate counts and verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub improved: usize,
    pub regressed: usize,
    pub neutral: usize,
    pub skipped: usize,
    /// True when fail-fast mode stopped before the end of the report
    pub stopped_early: bool,
    pub verdict: RegressionVerdict,
    pub exit_code: u8,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub format: String,
    pub mode: String,
    pub cases: Vec<JsonCase>,
    pub summary: JsonSummary,
}

impl JsonReport {
    pub fn from_assessment(assessment: &RegressionAssessment) -> Self {
        let cases = assessment
            .outcomes
            .iter()
            .map(|outcome| JsonCase {
                name: outcome.name.clone(),
                aggregate_name: outcome.aggregate_name.clone(),
                time: outcome.time,
                classification: outcome.classification,
            })
            .collect();

        JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            mode: assessment.config.mode.as_str().to_string(),
            cases,
            summary: JsonSummary {
                improved: assessment.increase(),
                regressed: assessment.decrease(),
                neutral: assessment.neutral(),
                skipped: assessment.skipped,
                stopped_early: assessment.stopped_early,
                verdict: assessment.verdict(),
                exit_code: assessment.exit_code(),
            },
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{assess_regression, RegressionConfig};
    use crate::report::{Report, TestCase};

    #[test]
    fn test_json_report_shape() {
        let report = Report::new(vec![
            TestCase::new("a", "", &[0.1]),
            TestCase::new("b", "mean", &[-0.1]),
            TestCase::new("c", "median", &[0.5]),
        ]);
        let assessment = assess_regression(&report, &RegressionConfig::default()).unwrap();
        let json = JsonReport::from_assessment(&assessment).to_json_string().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["format"], "benchgate-json-v1");
        assert_eq!(parsed["mode"], "full");
        assert_eq!(parsed["cases"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["cases"][0]["classification"], "regression");
        assert_eq!(parsed["cases"][1]["aggregate_name"], "mean");
        assert_eq!(parsed["summary"]["improved"], 1);
        assert_eq!(parsed["summary"]["regressed"], 1);
        assert_eq!(parsed["summary"]["skipped"], 1);
        assert_eq!(parsed["summary"]["verdict"], "regression");
        assert_eq!(parsed["summary"]["exit_code"], 2);
    }

    #[test]
    fn test_json_report_fail_fast_mode() {
        let report = Report::new(vec![
            TestCase::new("a", "", &[0.1]),
            TestCase::new("b", "", &[0.2]),
        ]);
        let assessment = assess_regression(&report, &RegressionConfig::fail_fast()).unwrap();
        let json = JsonReport::from_assessment(&assessment);

        assert_eq!(json.mode, "fail-fast");
        assert!(json.summary.stopped_early);
        assert_eq!(json.cases.len(), 1);
    }

    #[test]
    fn test_json_report_no_change() {
        let assessment =
            assess_regression(&Report::default(), &RegressionConfig::default()).unwrap();
        let json = JsonReport::from_assessment(&assessment);

        assert_eq!(json.summary.verdict, RegressionVerdict::NoChange);
        assert_eq!(json.summary.exit_code, 0);
        assert!(json.cases.is_empty());
    }
}
