//! Core domain models for architecture violations and check reports
//!
//! Violations are plain data: a file, an optional line, a message. The
//! report is an append-only accumulator; discovery order is part of the
//! external contract, so it is never sorted or deduplicated.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A dependency violation detected during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File path where the violation was found, relative to the project root
    pub file_path: PathBuf,
    /// Line number (1-indexed) of the offending include, if the violation
    /// is tied to a specific line
    pub line_number: Option<u32>,
    /// Human-readable description of the violation
    pub message: String,
}

impl Violation {
    /// Create a new violation without a line position
    pub fn new(file_path: PathBuf, message: impl Into<String>) -> Self {
        Self { file_path, line_number: None, message: message.into() }
    }

    /// Set the line number
    pub fn with_line(mut self, line: u32) -> Self {
        self.line_number = Some(line);
        self
    }

    /// Format violation for display as an `[ERROR]` block
    pub fn format_display(&self) -> String {
        format!("[ERROR] {}\n  {}", self.file_path.display(), self.message)
    }
}

/// Accumulated result of one checker run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    /// All violations in discovery order (traversal order, then line order)
    pub violations: Vec<Violation>,
    /// Number of files scanned across all layers
    pub files_scanned: usize,
}

impl CheckReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation, preserving discovery order
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Total number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Exit code this report maps to: 0 clean, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.has_violations() {
            1
        } else {
            0
        }
    }
}

/// Error types that can occur while setting up or running a check
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// File or directory could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Forbidden-pattern compilation failed
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Report serialization failed
    #[error("Report error: {message}")]
    Report { message: String },
}

impl CheckerError {
    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report { message: message.into() }
    }
}

/// Result type for checker operations
pub type CheckerResult<T> = Result<T, CheckerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_violation_creation() {
        let violation = Violation::new(
            PathBuf::from("src/domain/Entity.h"),
            "Line 3: DOMAIN LAYER VIOLATION - Forbidden include detected: #include <windows.h>",
        )
        .with_line(3);

        assert_eq!(violation.file_path, Path::new("src/domain/Entity.h"));
        assert_eq!(violation.line_number, Some(3));
        assert!(violation.message.contains("Forbidden include"));
    }

    #[test]
    fn test_violation_display_block() {
        let violation =
            Violation::new(PathBuf::from("src/abstractions/Foo.cpp"), "Implementation file");
        let block = violation.format_display();

        assert!(block.starts_with("[ERROR] src/abstractions/Foo.cpp"));
        assert!(block.ends_with("  Implementation file"));
    }

    #[test]
    fn test_report_preserves_order() {
        let mut report = CheckReport::new();
        report.add_violation(Violation::new(PathBuf::from("b.h"), "second file, first found"));
        report.add_violation(Violation::new(PathBuf::from("a.h"), "first file, found later"));

        assert_eq!(report.violation_count(), 2);
        assert_eq!(report.violations[0].file_path, Path::new("b.h"));
        assert_eq!(report.violations[1].file_path, Path::new("a.h"));
    }

    #[test]
    fn test_report_exit_codes() {
        let mut report = CheckReport::new();
        assert!(!report.has_violations());
        assert_eq!(report.exit_code(), 0);

        report.add_violation(Violation::new(PathBuf::from("x.h"), "boom"));
        assert!(report.has_violations());
        assert_eq!(report.exit_code(), 1);
    }
}
