//! # Validate Command
//!
//! Locates the configuration directory, runs the validation pass and
//! prints the console report.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mirror_schema::{validate_with, MirrorConfig, MirrorSchema, DEFAULT_SCHEMA_FILE};

use crate::render;

/// Directory searched for the schema when no `--config-dir` is given.
pub const CONFIG_SUBDIR: &str = "configs";

/// Arguments for the validation run.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory holding ToolsConfiguration.schema.json and the mirror files.
    /// Defaults to the nearest `configs/` directory above the current one.
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Run validation and print the report to stdout.
///
/// Returns exit code: 0 when every file passed, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, cwd: &Path) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, cwd, &mut out)
}

/// Same as [`run_validate`], writing the report to `out`.
pub fn run_validate_to(args: &ValidateArgs, cwd: &Path, out: &mut impl Write) -> Result<u8> {
    let config_dir = match &args.config_dir {
        Some(dir) => cwd.join(dir),
        None => discover_config_dir(cwd),
    };
    let config = MirrorConfig::new(config_dir);

    tracing::info!(
        schema = %config.schema_path().display(),
        targets = config.targets().len(),
        "starting mirror validation"
    );

    render::write_header(out).context("failed to write report")?;

    let schema = match MirrorSchema::load(config.schema_path()) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::info!(error = %e, "schema load failed");
            render::write_schema_load_failure(out, &e).context("failed to write report")?;
            return Ok(1);
        }
    };

    render::write_schema_loaded(out, &schema.name()).context("failed to write report")?;

    let report = validate_with(&schema, &config);

    for entry in report.entries.iter().filter(|e| !e.result.is_passed()) {
        tracing::info!(
            file = %entry.path.display(),
            outcome = entry.result.kind(),
            "target failed validation"
        );
    }

    render::write_results(out, &report).context("failed to write report")?;

    tracing::info!(
        passed = report.passed(),
        total = report.total(),
        "mirror validation finished"
    );

    Ok(report.exit_code())
}

/// Walk up from `start` to find the configuration directory.
///
/// A directory qualifies if it holds the schema itself or has a `configs/`
/// child that does. Falls back to `start/configs`.
pub fn discover_config_dir(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(DEFAULT_SCHEMA_FILE).is_file() {
            return dir.to_path_buf();
        }
        let candidate = dir.join(CONFIG_SUBDIR);
        if candidate.join(DEFAULT_SCHEMA_FILE).is_file() {
            return candidate;
        }
    }

    tracing::warn!(
        start = %start.display(),
        "no {CONFIG_SUBDIR}/{DEFAULT_SCHEMA_FILE} found in any parent directory"
    );
    start.join(CONFIG_SUBDIR)
}
