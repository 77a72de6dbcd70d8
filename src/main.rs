use anyhow::{Context, Result};
use benchgate::cli::{self, Cli, OutputFormat, ParsedArgs, EXIT_INPUT_ERROR};
use benchgate::json_output::JsonReport;
use benchgate::regression;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Evaluate the report and print notices (stderr) and summary (stdout)
fn run(args: &Cli) -> Result<u8> {
    let config = args.regression_config();
    let assessment = regression::evaluate(&args.report, &config).with_context(|| {
        format!(
            "Failed to evaluate benchmark report {}",
            args.report.display()
        )
    })?;

    // Render before printing so a failure leaves no partial output
    let summary = match args.format {
        OutputFormat::Text => assessment.summary_line(),
        OutputFormat::Json => JsonReport::from_assessment(&assessment)
            .to_json_string()
            .context("Failed to serialize JSON summary")?,
    };

    for notice in assessment.notices() {
        eprintln!("{}", notice);
    }
    println!("{}", summary);

    Ok(assessment.exit_code())
}

fn main() -> ExitCode {
    let args = match cli::parse_args(std::env::args_os()) {
        ParsedArgs::Run(args) => args,
        ParsedArgs::Exit { code, message } => {
            print!("{}", message);
            return ExitCode::from(code);
        }
    };

    init_tracing(args.debug);

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(EXIT_INPUT_ERROR)
        }
    }
}
