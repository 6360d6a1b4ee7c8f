//! Include Guardian - layered-architecture dependency enforcement
//!
//! Scans the `domain`, `abstractions`, and `application` subdirectories of
//! a C/C++ source tree for `#include` directives that cross architectural
//! boundaries, and reports the violations with an exit status suitable for
//! gating a build.

pub mod checker;
pub mod domain;
pub mod report;
pub mod rules;

// Re-export main types for convenient access
pub use domain::violations::{CheckReport, CheckerError, CheckerResult, Violation};

pub use checker::DependencyChecker;

pub use report::{OutputFormat, ReportFormatter};

pub use rules::{Layer, LayerRules};

use std::path::Path;

/// Convenience function: scan all three layers under `root` and return the
/// accumulated report
pub fn check_project<P: AsRef<Path>>(root: P) -> CheckerResult<CheckReport> {
    let mut checker = DependencyChecker::new(root)?;
    checker.scan_all();
    Ok(checker.into_report())
}
