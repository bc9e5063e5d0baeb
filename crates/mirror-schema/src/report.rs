//! # Validation Report
//!
//! Runs a full pass over a [`MirrorConfig`] and collects per-file results
//! in target-list order.

use std::path::PathBuf;

use crate::config::MirrorConfig;
use crate::validate::{MirrorSchema, SchemaLoadError, ValidationResult};

/// Result for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Target filename as listed in the configuration.
    pub filename: String,
    /// Resolved path that was checked.
    pub path: PathBuf,
    /// Classification of the file.
    pub result: ValidationResult,
}

/// Results of one run, one entry per target in configuration order.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Path of the schema the files were checked against.
    pub schema_path: PathBuf,
    /// Per-file results.
    pub entries: Vec<FileReport>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// True iff every entry is [`ValidationResult::Passed`].
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|e| e.result.is_passed())
    }

    /// Process exit status: 0 when everything passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Load the schema named by `config` and check every target file.
///
/// Each target is checked independently; a failing file never stops the
/// remaining ones.
///
/// # Errors
///
/// Returns [`SchemaLoadError`] if the schema cannot be read or parsed. No
/// target is touched in that case.
pub fn validate_all(config: &MirrorConfig) -> Result<ValidationReport, SchemaLoadError> {
    let schema = MirrorSchema::load(config.schema_path())?;
    tracing::debug!(schema = %schema.path().display(), "loaded schema");
    Ok(validate_with(&schema, config))
}

/// Check every target file of `config` against an already loaded schema.
///
/// The schema is compiled once and shared by every target.
pub fn validate_with(schema: &MirrorSchema, config: &MirrorConfig) -> ValidationReport {
    let compiled = schema.compile();
    let entries = config
        .targets()
        .iter()
        .map(|filename| {
            let path = config.target_path(filename);
            let result = compiled.validate_file(&path);
            tracing::debug!(file = %filename, outcome = result.kind(), "checked target");
            FileReport {
                filename: filename.clone(),
                path,
                result,
            }
        })
        .collect();

    ValidationReport {
        schema_path: schema.path().to_path_buf(),
        entries,
    }
}
