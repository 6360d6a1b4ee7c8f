//! Report rendering with multiple output formats
//!
//! The human format reproduces the checker's console contract exactly:
//! banner, per-layer progress lines, `[ERROR]` blocks, pass/fail banner.
//! JSON and GitHub Actions annotations are alternative representations of
//! the same report for programmatic consumers.

use crate::domain::violations::{CheckReport, CheckerError, CheckerResult, Violation};
use crate::rules::Layer;
use std::path::Path;

/// Width of the `=` banner lines
const BANNER_WIDTH: usize = 80;

/// Supported output formats for check reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console report (the default contract format)
    Human,
    /// JSON for programmatic consumption
    Json,
    /// GitHub Actions annotations for workflow integration
    Github,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "github" => Some(Self::Github),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "github"]
    }
}

/// Formats check reports for output
#[derive(Debug, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }

    /// Render the scan header: banner plus the scanned source path.
    /// Emitted before scanning starts, human format only.
    pub fn format_header(&self, src_path: &Path) -> String {
        format!("{}\nClean Architecture Dependency Checker\n{}\nScanning: {}\n", banner(), banner(), src_path.display())
    }

    /// Render the progress line printed before a layer is scanned
    pub fn format_progress(&self, layer: Layer) -> String {
        format!("Checking {} layer...", layer.display_name())
    }

    /// Format the final report in the requested format
    pub fn format_report(
        &self,
        report: &CheckReport,
        format: OutputFormat,
    ) -> CheckerResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(report)),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Github => Ok(self.format_github(report)),
        }
    }

    fn format_human(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        if report.has_violations() {
            output.push_str(&format!(
                "\n{}\nDEPENDENCY VIOLATIONS FOUND: {}\n{}\n",
                banner(),
                report.violation_count(),
                banner()
            ));

            for violation in &report.violations {
                output.push_str(&format!("\n{}\n", violation.format_display()));
            }

            output.push_str(&format!(
                "\n{}\nBuild aborted due to architecture violations!\n{}",
                banner(),
                banner()
            ));
        } else {
            output.push_str(&format!(
                "\n{}\n\u{2713} All dependency checks passed!\n{}",
                banner(),
                banner()
            ));
        }

        output
    }

    fn format_json(&self, report: &CheckReport) -> CheckerResult<String> {
        let json_violations: Vec<serde_json::Value> = report
            .violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "file_path": v.file_path.display().to_string(),
                    "line_number": v.line_number,
                    "message": v.message,
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "violations": json_violations,
            "summary": {
                "files_scanned": report.files_scanned,
                "violation_count": report.violation_count(),
            },
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| CheckerError::report(format!("JSON serialization failed: {e}")))
    }

    fn format_github(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        for violation in &report.violations {
            output.push_str(&format_annotation(violation));
            output.push('\n');
        }

        output
    }
}

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn format_annotation(violation: &Violation) -> String {
    match violation.line_number {
        Some(line) => format!(
            "::error file={},line={}::{}",
            violation.file_path.display(),
            line,
            violation.message
        ),
        None => format!("::error file={}::{}", violation.file_path.display(), violation.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn failing_report() -> CheckReport {
        let mut report = CheckReport::new();
        report.add_violation(
            Violation::new(
                PathBuf::from("src/domain/Entity.h"),
                "Line 2: DOMAIN LAYER VIOLATION - Forbidden include detected: #include <windows.h>",
            )
            .with_line(2),
        );
        report.add_violation(Violation::new(
            PathBuf::from("src/abstractions/Foo.cpp"),
            "ABSTRACTIONS LAYER VIOLATION - Implementation file (.cpp) not allowed in abstractions",
        ));
        report.files_scanned = 5;
        report
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("github"), Some(OutputFormat::Github));
        assert_eq!(OutputFormat::from_str("yaml"), None);
        assert_eq!(OutputFormat::all_formats().len(), 3);
    }

    #[test]
    fn test_header_and_progress() {
        let formatter = ReportFormatter::new();
        let header = formatter.format_header(Path::new("/tmp/project/src"));

        assert!(header.contains("Clean Architecture Dependency Checker"));
        assert!(header.contains("Scanning: /tmp/project/src"));
        assert!(header.contains(&"=".repeat(80)));

        assert_eq!(formatter.format_progress(Layer::Domain), "Checking Domain layer...");
        assert_eq!(
            formatter.format_progress(Layer::Abstractions),
            "Checking Abstractions layer..."
        );
        assert_eq!(
            formatter.format_progress(Layer::Application),
            "Checking Application layer..."
        );
    }

    #[test]
    fn test_human_failure_format() {
        let formatter = ReportFormatter::new();
        let output = formatter.format_report(&failing_report(), OutputFormat::Human).unwrap();

        assert!(output.contains("DEPENDENCY VIOLATIONS FOUND: 2"));
        assert!(output.contains("[ERROR] src/domain/Entity.h"));
        assert!(output.contains("  Line 2: DOMAIN LAYER VIOLATION"));
        assert!(output.contains("[ERROR] src/abstractions/Foo.cpp"));
        assert!(output.contains("Build aborted due to architecture violations!"));
    }

    #[test]
    fn test_human_success_format() {
        let formatter = ReportFormatter::new();
        let output = formatter.format_report(&CheckReport::new(), OutputFormat::Human).unwrap();

        assert!(output.contains("\u{2713} All dependency checks passed!"));
        assert!(!output.contains("[ERROR]"));
    }

    #[test]
    fn test_human_failure_preserves_order() {
        let formatter = ReportFormatter::new();
        let output = formatter.format_report(&failing_report(), OutputFormat::Human).unwrap();

        let first = output.find("src/domain/Entity.h").unwrap();
        let second = output.find("src/abstractions/Foo.cpp").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_json_format() {
        let formatter = ReportFormatter::new();
        let output = formatter.format_report(&failing_report(), OutputFormat::Json).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["violations"].as_array().unwrap().len(), 2);
        assert_eq!(json["violations"][0]["file_path"], "src/domain/Entity.h");
        assert_eq!(json["violations"][0]["line_number"], 2);
        assert_eq!(json["violations"][1]["line_number"], serde_json::Value::Null);
        assert_eq!(json["summary"]["files_scanned"], 5);
        assert_eq!(json["summary"]["violation_count"], 2);
    }

    #[test]
    fn test_github_format() {
        let formatter = ReportFormatter::new();
        let output = formatter.format_report(&failing_report(), OutputFormat::Github).unwrap();

        assert!(output.contains("::error file=src/domain/Entity.h,line=2::"));
        assert!(output.contains("::error file=src/abstractions/Foo.cpp::"));
    }
}
