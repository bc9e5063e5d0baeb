//! # Validation Configuration
//!
//! Where the schema lives and which files are checked against it.

use std::path::{Path, PathBuf};

/// Schema filename expected in the configuration directory.
pub const DEFAULT_SCHEMA_FILE: &str = "ToolsConfiguration.schema.json";

/// Mirror configuration files checked by default, in report order.
pub const MIRROR_FILES: [&str; 5] = [
    "brew_mirror.json",
    "maven_mirror.json",
    "npm_mirror.json",
    "orbstack_mirror.json",
    "python_pip.json",
];

/// Input set for one validation run.
///
/// Target filenames are resolved against the directory that contains the
/// schema file, never against the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    config_dir: PathBuf,
    schema_file: String,
    targets: Vec<String>,
}

impl MirrorConfig {
    /// Standard configuration rooted at `config_dir`: the default schema
    /// name and the five mirror files.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            schema_file: DEFAULT_SCHEMA_FILE.to_string(),
            targets: MIRROR_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the schema filename.
    pub fn with_schema_file(mut self, schema_file: impl Into<String>) -> Self {
        self.schema_file = schema_file.into();
        self
    }

    /// Replace the target list. Order is preserved in the report.
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn schema_file(&self) -> &str {
        &self.schema_file
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Full path of the schema file.
    pub fn schema_path(&self) -> PathBuf {
        self.config_dir.join(&self.schema_file)
    }

    /// Directory the targets are resolved against: the schema file's parent.
    pub fn target_dir(&self) -> PathBuf {
        self.schema_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config_dir.clone())
    }

    /// Full path of a target file.
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.target_dir().join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_schema_and_mirror_files() {
        let config = MirrorConfig::new("/etc/mirrors");
        assert_eq!(config.schema_file(), DEFAULT_SCHEMA_FILE);
        assert_eq!(config.targets().len(), 5);
        assert_eq!(config.targets()[0], "brew_mirror.json");
        assert_eq!(config.targets()[4], "python_pip.json");
    }

    #[test]
    fn targets_resolve_next_to_schema() {
        let config = MirrorConfig::new("/etc/mirrors").with_schema_file("nested/tools.schema.json");
        assert_eq!(
            config.schema_path(),
            PathBuf::from("/etc/mirrors/nested/tools.schema.json")
        );
        assert_eq!(
            config.target_path("npm_mirror.json"),
            PathBuf::from("/etc/mirrors/nested/npm_mirror.json")
        );
    }

    #[test]
    fn with_targets_keeps_order() {
        let config = MirrorConfig::new(".").with_targets(["z.json", "a.json", "m.json"]);
        assert_eq!(config.targets(), ["z.json", "a.json", "m.json"]);
    }
}
