// Fixed thresholds and evaluation mode for the regression gate
//
// Thresholds are crate constants (+/-5%) and cannot be overridden at runtime.
// The only runtime knob is how far the scan goes.

use serde::{Deserialize, Serialize};

/// Deltas strictly below this value count as an improvement (-5%)
pub const IMPROVEMENT_THRESHOLD: f64 = -0.05;

/// Deltas strictly above this value count as a regression (+5%)
pub const REGRESSION_THRESHOLD: f64 = 0.05;

/// Aggregate label of the only aggregate trusted for a verdict
pub const MEAN_AGGREGATE: &str = "mean";

/// How far the evaluator scans once a regression is found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Classify every test case and report a full summary (default)
    #[default]
    Full,

    /// Stop at the first regression
    FailFast,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Full => "full",
            EvaluationMode::FailFast => "fail-fast",
        }
    }
}

/// Configuration for a report evaluation
///
/// # Example
/// ```
/// use benchgate::regression::{EvaluationMode, RegressionConfig};
///
/// let config = RegressionConfig::default();
/// assert_eq!(config.mode, EvaluationMode::Full);
/// assert!(RegressionConfig::fail_fast().stops_at_first_regression());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionConfig {
    pub mode: EvaluationMode,
}

impl RegressionConfig {
    /// Short-circuit configuration: the summary only covers cases scanned
    /// up to and including the first regression.
    pub fn fail_fast() -> Self {
        Self {
            mode: EvaluationMode::FailFast,
        }
    }

    pub fn stops_at_first_regression(&self) -> bool {
        self.mode == EvaluationMode::FailFast
    }
}
