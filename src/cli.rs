//! CLI argument parsing for benchgate

use crate::regression::RegressionConfig;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Exit status for a malformed command line; no file is read
pub const EXIT_USAGE: u8 = 1;

/// Exit status for an unreadable or malformed report
pub const EXIT_INPUT_ERROR: u8 = 3;

/// Output format for the summary printed on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One-line human-readable summary (default)
    #[default]
    Text,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchgate")]
#[command(version)]
#[command(about = "Fail CI when a benchmark comparison report shows a regression", long_about = None)]
pub struct Cli {
    /// Path to the benchmark comparison report (JSON)
    ///
    /// A leading '-' is accepted; known flags still take precedence.
    #[arg(value_name = "REPORT", allow_hyphen_values = true)]
    pub report: PathBuf,

    /// Stop at the first regression instead of scanning the whole report
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Summary format on stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn regression_config(&self) -> RegressionConfig {
        if self.fail_fast {
            RegressionConfig::fail_fast()
        } else {
            RegressionConfig::default()
        }
    }
}

/// Result of command-line parsing
#[derive(Debug)]
pub enum ParsedArgs {
    /// Arguments are valid, evaluate the report
    Run(Cli),
    /// Print `message` on stdout and exit with `code` without reading anything
    Exit { code: u8, message: String },
}

/// Usage text printed on a malformed command line
pub fn usage() -> String {
    format!(
        "{}\n\nFor more information, try '--help'.\n",
        Cli::command().render_usage()
    )
}

/// Parse the command line
///
/// Help and version requests exit successfully. Any other parse failure
/// (missing report, extra positional arguments, invalid option values) is a
/// usage error. An unrecognized `-`-prefixed token fills the report slot.
pub fn parse_args<I, T>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParsedArgs::Run(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParsedArgs::Exit {
                code: 0,
                message: err.to_string(),
            },
            _ => ParsedArgs::Exit {
                code: EXIT_USAGE,
                message: usage(),
            },
        },
    }
}
