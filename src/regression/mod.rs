// Benchmark regression gate
//
// Decides whether a comparison report (candidate vs. baseline) shows a
// performance regression large enough to fail a CI run.
//
// Pipeline:
// - policy: select the authoritative entries (raw single runs, mean
//   aggregates) and classify their first time delta against +/-5%
// - verdict: aggregate improvement/regression counts into a verdict and an
//   exit status
// - config: fixed thresholds and the full-scan/fail-fast mode

mod config;
mod policy;
mod verdict;

pub use config::{
    EvaluationMode, RegressionConfig, IMPROVEMENT_THRESHOLD, MEAN_AGGREGATE, REGRESSION_THRESHOLD,
};
pub use policy::{classify, skip_reason, Classification, Selection, SkipReason};
pub use verdict::{
    assess_regression, evaluate, CaseOutcome, RegressionAssessment, RegressionVerdict,
    EXIT_NO_REGRESSION, EXIT_REGRESSION,
};
