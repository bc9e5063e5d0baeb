//! # mirror-schema — Mirror Configuration Validation
//!
//! Checks the package-mirror configuration files that ship next to
//! `ToolsConfiguration.schema.json` against that schema.
//!
//! ## Configuration (`config`)
//!
//! [`MirrorConfig`] names the configuration directory, the schema file and
//! the ordered list of target files. [`MirrorConfig::new`] fills in the
//! standard five mirror files.
//!
//! ## Validation (`validate`)
//!
//! [`MirrorSchema`] loads the schema once and classifies each target file
//! into a [`ValidationResult`]. Only a schema that cannot be read or parsed
//! is an error ([`SchemaLoadError`]); every per-file problem is a value.
//!
//! ## Reporting (`report`)
//!
//! [`validate_all`] runs the whole pipeline and returns a
//! [`ValidationReport`] in target-list order. Rendering is left to callers.

pub mod config;
pub mod report;
pub mod validate;

pub use config::{MirrorConfig, DEFAULT_SCHEMA_FILE, MIRROR_FILES};
pub use report::{validate_all, validate_with, FileReport, ValidationReport};
pub use validate::{
    CompileError, CompiledSchema, MirrorSchema, SchemaLoadError, ValidationResult, Violation,
};
