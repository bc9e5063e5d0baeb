//! # Schema Validation
//!
//! Loads `ToolsConfiguration.schema.json` and checks mirror configuration
//! documents against it.
//!
//! ## Error Model
//!
//! Failing to read or parse the schema is the only error
//! ([`SchemaLoadError`]) and callers treat it as fatal. Everything that can
//! go wrong with a single target file is folded into a
//! [`ValidationResult`] so one bad file never stops the others.
//!
//! ## Schema Resolution
//!
//! The JSON Schema draft comes from the schema's `$schema` keyword
//! (Draft 2020-12 when absent). `format` is an annotation only, for every
//! draft. A relative `$ref` naming a file next to the schema is loaded from
//! disk; any other external reference resolves to the permissive schema
//! `{}`. No network requests are made.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Base URI the validator resolves relative `$ref`s against when the
/// schema has no `$id`.
const RELATIVE_REF_BASE: &str = "json-schema:///";

/// Resolves relative `$ref`s against the schema's own directory.
struct SiblingFileRetriever {
    base_dir: PathBuf,
}

impl SiblingFileRetriever {
    /// Local filename for `uri`, if it is a relative reference to a plain
    /// file name.
    fn sibling_name(uri: &str) -> Option<&str> {
        let path = uri.strip_prefix(RELATIVE_REF_BASE)?;
        let name = path.split('#').next().unwrap_or(path);
        if name.is_empty() || name.contains('/') || name == ".." || name == "." {
            return None;
        }
        Some(name)
    }
}

impl Retrieve for SiblingFileRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(name) = Self::sibling_name(uri.as_str()) {
            let candidate = self.base_dir.join(name);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)?;
                return Ok(serde_json::from_str(&content)?);
            }
        }

        Ok(serde_json::json!({}))
    }
}

/// The schema file could not be loaded. Aborts the whole run.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The file could not be opened or read.
    #[error("cannot read '{path}': {reason}")]
    Read {
        /// Schema file path.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in '{path}': {reason}")]
    Parse {
        /// Schema file path.
        path: String,
        /// Parser diagnostic, including line and column.
        reason: String,
    },
}

/// The loaded schema is not a usable JSON Schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot compile schema '{schema_name}': {reason}")]
pub struct CompileError {
    /// Schema filename.
    pub schema_name: String,
    /// Compiler diagnostic.
    pub reason: String,
}

/// A single way a document fails to conform to the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the document. Empty for the root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description from the validator.
    pub message: String,
}

impl Violation {
    fn from_error(error: &jsonschema::ValidationError<'_>) -> Self {
        Self {
            instance_path: error.instance_path.to_string(),
            schema_path: error.schema_path.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Outcome of checking one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The document conforms to the schema.
    Passed,
    /// The document is valid JSON but breaks the schema. Holds the first violation.
    SchemaViolation(Violation),
    /// The document is not valid JSON.
    ParseError(String),
    /// Anything else: unreadable file, uncompilable schema.
    OtherError(String),
    /// The file does not exist.
    Missing,
}

impl ValidationResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationResult::Passed)
    }

    /// Short machine-friendly label, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationResult::Passed => "passed",
            ValidationResult::SchemaViolation(_) => "schema_violation",
            ValidationResult::ParseError(_) => "parse_error",
            ValidationResult::OtherError(_) => "other_error",
            ValidationResult::Missing => "missing",
        }
    }
}

/// The active schema, loaded once per run.
#[derive(Debug, Clone)]
pub struct MirrorSchema {
    path: PathBuf,
    value: Value,
}

impl MirrorSchema {
    /// Read and parse the schema file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Read`] if the file cannot be read and
    /// [`SchemaLoadError::Parse`] if it is not valid JSON. Whether the value
    /// is a valid JSON Schema is not checked here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SchemaLoadError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| SchemaLoadError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::from_value(path, value))
    }

    /// Wrap an already-parsed schema. `path` anchors sibling `$ref` lookups.
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Schema filename, for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Compile the schema into a `Validator`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the schema is not a valid JSON Schema or a
    /// sibling `$ref` cannot be loaded.
    pub fn build_validator(&self) -> Result<Validator, CompileError> {
        let base_dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut opts = jsonschema::options();
        opts.should_validate_formats(false)
            .with_retriever(SiblingFileRetriever { base_dir });

        opts.build(&self.value).map_err(|e| CompileError {
            schema_name: self.name(),
            reason: e.to_string(),
        })
    }

    /// Every violation of `instance` against the schema, in validator order.
    pub fn violations(&self, instance: &Value) -> Result<Vec<Violation>, CompileError> {
        let validator = self.build_validator()?;
        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation::from_error(&e))
            .collect();
        Ok(violations)
    }

    /// Compile once for checking several documents.
    ///
    /// A schema that does not compile is not an error here: every check made
    /// through the result reports it as [`ValidationResult::OtherError`].
    pub fn compile(&self) -> CompiledSchema<'_> {
        let validator = self.build_validator();
        if let Err(e) = &validator {
            tracing::debug!(schema = %self.path.display(), error = %e, "schema did not compile");
        }
        CompiledSchema {
            schema: self,
            validator,
        }
    }

    /// Classify an in-memory document. Reports only the first violation.
    pub fn check_value(&self, instance: &Value) -> ValidationResult {
        self.compile().check_value(instance)
    }

    /// Read, parse and check the document at `path`.
    pub fn validate_file(&self, path: &Path) -> ValidationResult {
        self.compile().validate_file(path)
    }
}

/// A [`MirrorSchema`] together with its compiled validator.
pub struct CompiledSchema<'a> {
    schema: &'a MirrorSchema,
    validator: Result<Validator, CompileError>,
}

impl CompiledSchema<'_> {
    pub fn schema(&self) -> &MirrorSchema {
        self.schema
    }

    /// Classify an in-memory document. Reports only the first violation.
    pub fn check_value(&self, instance: &Value) -> ValidationResult {
        let validator = match &self.validator {
            Ok(v) => v,
            Err(e) => return ValidationResult::OtherError(e.to_string()),
        };

        let first = validator.iter_errors(instance).next();
        match first {
            Some(error) => ValidationResult::SchemaViolation(Violation::from_error(&error)),
            None => ValidationResult::Passed,
        }
    }

    /// Read, parse and check the document at `path`.
    ///
    /// Never fails: a missing file is [`ValidationResult::Missing`], an
    /// unreadable one [`ValidationResult::OtherError`], malformed JSON
    /// [`ValidationResult::ParseError`].
    pub fn validate_file(&self, path: &Path) -> ValidationResult {
        if !path.exists() {
            return ValidationResult::Missing;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => return ValidationResult::OtherError(e.to_string()),
        };

        let instance: Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => return ValidationResult::ParseError(e.to_string()),
        };

        self.check_value(&instance)
    }
}
