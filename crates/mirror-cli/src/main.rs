//! # mirror-validate entry point
//!
//! Parses arguments, sets up logging and runs the validation pass.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mirror_cli::validate::{run_validate, ValidateArgs};

/// Validate mirror configuration files against ToolsConfiguration.schema.json.
///
/// Checks brew, maven, npm, orbstack and pip mirror configurations and
/// exits non-zero if any of them is missing, malformed or non-conforming.
#[derive(Parser, Debug)]
#[command(name = "mirror-validate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose diagnostics on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("cannot determine current directory: {e}");
            return ExitCode::from(1);
        }
    };

    match run_validate(&cli.validate, &cwd) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
