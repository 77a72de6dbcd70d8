//! benchgate - benchmark regression gate for CI
//!
//! Reads a benchmark comparison report (candidate vs. baseline relative time
//! deltas), classifies every authoritative entry against a fixed +/-5%
//! tolerance and turns the result into a verdict and a process exit status.

pub mod cli;
pub mod json_output;
pub mod regression;
pub mod report;
