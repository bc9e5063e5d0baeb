//! # Console Report
//!
//! Formats validation results for a human reader. Output is decorative and
//! not meant for machine parsing.

use std::io::{self, Write};

use mirror_schema::{FileReport, SchemaLoadError, ValidationReport, ValidationResult};

/// Width of the `=` and `-` banner lines.
pub const BANNER_WIDTH: usize = 60;

/// Width of the padded filename column.
const FILENAME_WIDTH: usize = 30;

const TITLE: &str = "Mirror configuration schema validation";

pub fn write_header(out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{rule}")
}

pub fn write_schema_loaded(out: &mut impl Write, schema_name: &str) -> io::Result<()> {
    writeln!(out, "✓ loaded schema: {schema_name}")?;
    writeln!(out)
}

pub fn write_schema_load_failure(out: &mut impl Write, err: &SchemaLoadError) -> io::Result<()> {
    writeln!(out, "❌ cannot load schema file: {err}")
}

/// Per-file section plus the closing verdict.
pub fn write_results(out: &mut impl Write, report: &ValidationReport) -> io::Result<()> {
    let rule = "-".repeat(BANNER_WIDTH);
    writeln!(out)?;
    writeln!(out, "Validation results:")?;
    writeln!(out, "{rule}")?;

    for entry in &report.entries {
        writeln!(out, "{}", status_line(entry))?;
    }

    writeln!(out, "{rule}")?;
    writeln!(out)?;

    if report.all_passed() {
        writeln!(out, "✅ all files passed validation!")
    } else {
        writeln!(out, "❌ some files failed validation, check the errors above!")
    }
}

/// One report line: mark, padded filename, message.
pub fn status_line(entry: &FileReport) -> String {
    let mark = if entry.result.is_passed() { "✓" } else { "✗" };
    format!(
        "{mark} {:<width$} {}",
        entry.filename,
        result_message(&entry.result),
        width = FILENAME_WIDTH
    )
}

pub fn result_message(result: &ValidationResult) -> String {
    match result {
        ValidationResult::Passed => "✅ passed".to_string(),
        ValidationResult::SchemaViolation(v) => format!("❌ validation failed: {v}"),
        ValidationResult::ParseError(msg) => format!("❌ JSON parse error: {msg}"),
        ValidationResult::OtherError(msg) => format!("❌ error: {msg}"),
        ValidationResult::Missing => "⚠️ file does not exist".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_schema::Violation;
    use std::path::PathBuf;

    fn entry(name: &str, result: ValidationResult) -> FileReport {
        FileReport {
            filename: name.to_string(),
            path: PathBuf::from(name),
            result,
        }
    }

    fn render(report: &ValidationReport) -> String {
        let mut buf = Vec::new();
        write_results(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn status_line_pads_filename_column() {
        let line = status_line(&entry("npm_mirror.json", ValidationResult::Passed));
        assert_eq!(line, format!("✓ {:<30} ✅ passed", "npm_mirror.json"));
        assert!(line.starts_with("✓ npm_mirror.json "));
    }

    #[test]
    fn each_result_kind_has_distinct_message() {
        let violation = Violation {
            instance_path: "/registry".to_string(),
            schema_path: "/properties/registry/type".to_string(),
            message: r#"123 is not of type "string""#.to_string(),
        };
        assert_eq!(
            result_message(&ValidationResult::SchemaViolation(violation)),
            r#"❌ validation failed: /registry: 123 is not of type "string""#
        );
        assert!(result_message(&ValidationResult::ParseError("eof".into()))
            .starts_with("❌ JSON parse error:"));
        assert!(result_message(&ValidationResult::OtherError("denied".into()))
            .starts_with("❌ error:"));
        assert_eq!(
            result_message(&ValidationResult::Missing),
            "⚠️ file does not exist"
        );
    }

    #[test]
    fn failing_entry_uses_cross_mark() {
        let line = status_line(&entry("brew_mirror.json", ValidationResult::Missing));
        assert!(line.starts_with("✗ brew_mirror.json"));
    }

    #[test]
    fn closing_banner_reflects_overall_result() {
        let passing = ValidationReport {
            schema_path: PathBuf::from("s.schema.json"),
            entries: vec![entry("a.json", ValidationResult::Passed)],
        };
        let text = render(&passing);
        assert!(text.contains("✅ all files passed validation!"));
        assert!(text.contains(&"-".repeat(BANNER_WIDTH)));

        let failing = ValidationReport {
            schema_path: PathBuf::from("s.schema.json"),
            entries: vec![
                entry("a.json", ValidationResult::Passed),
                entry("b.json", ValidationResult::Missing),
            ],
        };
        let text = render(&failing);
        assert!(text.contains("❌ some files failed validation"));
        assert!(!text.contains("all files passed"));
    }

    #[test]
    fn header_is_framed_by_rules() {
        let mut buf = Vec::new();
        write_header(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "=".repeat(BANNER_WIDTH));
        assert_eq!(lines[2], lines[0]);
    }
}
