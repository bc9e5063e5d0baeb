//! # mirror-cli — Mirror Configuration Validation CLI
//!
//! Thin command-line front end over `mirror-schema`.
//!
//! ## Modules
//!
//! - `validate` — argument parsing, configuration discovery, exit code
//! - `render` — the human-readable console report
//!
//! ## Crate Policy
//!
//! - Validation logic lives in `mirror-schema`; nothing here classifies files.
//! - The report goes to stdout, diagnostics go to stderr through `tracing`.

pub mod render;
pub mod validate;
