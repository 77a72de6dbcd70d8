#![no_main]

use benchgate::regression::{assess_regression, RegressionConfig};
use benchgate::report::Report;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed reports must surface as errors, never as panics
    if let Ok(report) = Report::from_slice(data) {
        let _ = assess_regression(&report, &RegressionConfig::default());
        let _ = assess_regression(&report, &RegressionConfig::fail_fast());
    }
});
