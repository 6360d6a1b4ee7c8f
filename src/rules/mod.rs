//! Layer rule engine for detecting forbidden include dependencies
//!
//! One operation, three tagged variants: every layer carries a fixed list of
//! forbidden patterns and a classifier that turns a matched include line
//! into zero or more violations. The overlaps in the rule set are
//! deliberate: the domain substring checks run independently of the pattern
//! loop, so a single line can produce several violations.

use crate::domain::violations::{CheckerError, CheckerResult, Violation};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// File extension treated as a header
pub const HEADER_EXTENSION: &str = "h";
/// File extension treated as an implementation file
pub const IMPL_EXTENSION: &str = "cpp";

/// Token that marks a line as an include directive
pub const INCLUDE_TOKEN: &str = "#include";

/// The three architectural layers whose includes are restricted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Domain,
    Abstractions,
    Application,
}

impl Layer {
    /// All layers in the fixed scan order
    pub const ALL: [Layer; 3] = [Layer::Domain, Layer::Abstractions, Layer::Application];

    /// Subdirectory of `src/` this layer lives in
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Abstractions => "abstractions",
            Self::Application => "application",
        }
    }

    /// Capitalized name used in progress output
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Abstractions => "Abstractions",
            Self::Application => "Application",
        }
    }

    /// Ordered forbidden-pattern list for this layer. Matched
    /// case-insensitively against the raw trimmed include line.
    fn forbidden_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                r"<windows\.h>",
                r"<winnt\.h>",
                r"<winbase\.h>",
                r"<windef\.h>",
                r"<winnls\.h>",
                r"<wincon\.h>",
                r"<winuser\.h>",
                r"<wingdi\.h>",
                r"<fileapi\.h>",
                r"<handleapi\.h>",
                r"<processthreadsapi\.h>",
                r"<synchapi\.h>",
                r"<memoryapi\.h>",
                r"<winioctl\.h>",
                r"<commctrl\.h>",
                r#"".*win32.*""#,
                r#"".*adapters.*""#,
                r#"".*application.*""#,
            ],
            Self::Abstractions => &[
                r"<windows\.h>",
                r#"".*adapters.*""#,
                r#"".*application.*""#,
                r#"".*\.cpp""#,
            ],
            Self::Application => &[r#"".*adapters.*""#, r"<windows\.h>"],
        }
    }
}

/// Compiled rule set for one layer
#[derive(Debug)]
pub struct LayerRules {
    layer: Layer,
    patterns: Vec<Regex>,
}

impl LayerRules {
    /// Compile the forbidden-pattern list for a layer
    pub fn compile(layer: Layer) -> CheckerResult<Self> {
        let mut patterns = Vec::new();

        for pattern in layer.forbidden_patterns() {
            tracing::debug!("Compiling {} pattern '{}'", layer.display_name(), pattern);

            let regex =
                RegexBuilder::new(pattern).case_insensitive(true).build().map_err(|e| {
                    CheckerError::pattern(format!("Invalid pattern '{pattern}': {e}"))
                })?;
            patterns.push(regex);
        }

        Ok(Self { layer, patterns })
    }

    /// The layer these rules belong to
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Evaluate one include line, appending any violations it produces.
    ///
    /// `file_path` is the root-relative path used in violation entries and
    /// `line_number` is 1-indexed. The line is expected to be pre-trimmed
    /// and to start with the include token.
    pub fn evaluate_line(
        &self,
        file_path: &Path,
        line_number: u32,
        line: &str,
        out: &mut Vec<Violation>,
    ) {
        match self.layer {
            Layer::Domain => self.evaluate_domain(file_path, line_number, line, out),
            Layer::Abstractions => self.evaluate_abstractions(file_path, line_number, line, out),
            Layer::Application => self.evaluate_application(file_path, line_number, line, out),
        }
    }

    fn evaluate_domain(
        &self,
        file_path: &Path,
        line_number: u32,
        line: &str,
        out: &mut Vec<Violation>,
    ) {
        for pattern in &self.patterns {
            if pattern.is_match(line) {
                out.push(
                    Violation::new(
                        file_path.to_path_buf(),
                        format!(
                            "Line {line_number}: DOMAIN LAYER VIOLATION - \
                             Forbidden include detected: {line}"
                        ),
                    )
                    .with_line(line_number),
                );
            }
        }

        // The substring checks are independent of the pattern loop, so a
        // single line can be counted more than once.
        let lowered = line.to_lowercase();

        if lowered.contains("application") {
            out.push(
                Violation::new(
                    file_path.to_path_buf(),
                    format!("Line {line_number}: DOMAIN -> APPLICATION dependency violation: {line}"),
                )
                .with_line(line_number),
            );
        }

        if lowered.contains("adapters") {
            out.push(
                Violation::new(
                    file_path.to_path_buf(),
                    format!("Line {line_number}: DOMAIN -> ADAPTERS dependency violation: {line}"),
                )
                .with_line(line_number),
            );
        }
    }

    fn evaluate_abstractions(
        &self,
        file_path: &Path,
        line_number: u32,
        line: &str,
        out: &mut Vec<Violation>,
    ) {
        for pattern in &self.patterns {
            if pattern.is_match(line) {
                out.push(
                    Violation::new(
                        file_path.to_path_buf(),
                        format!(
                            "Line {line_number}: ABSTRACTIONS LAYER VIOLATION - \
                             Forbidden include: {line}"
                        ),
                    )
                    .with_line(line_number),
                );
            }
        }
    }

    fn evaluate_application(
        &self,
        file_path: &Path,
        line_number: u32,
        line: &str,
        out: &mut Vec<Violation>,
    ) {
        for pattern in &self.patterns {
            if !pattern.is_match(line) {
                continue;
            }

            // Matches are classified by substring. A match that satisfies
            // neither branch reports nothing; with the current pattern set
            // that cannot happen, but the rule set keeps the original
            // classification shape.
            let lowered = line.to_lowercase();

            if lowered.contains("adapters") {
                out.push(
                    Violation::new(
                        file_path.to_path_buf(),
                        format!(
                            "Line {line_number}: APPLICATION -> ADAPTERS \
                             dependency violation: {line}"
                        ),
                    )
                    .with_line(line_number),
                );
            } else if lowered.contains("windows.h") {
                out.push(
                    Violation::new(
                        file_path.to_path_buf(),
                        format!(
                            "Line {line_number}: APPLICATION LAYER - \
                             Windows API usage not allowed: {line}"
                        ),
                    )
                    .with_line(line_number),
                );
            }
        }
    }

    /// Per-file check: the abstractions layer may contain only header-style
    /// files. Reported without a line number.
    pub fn evaluate_file_name(&self, file_path: &Path, out: &mut Vec<Violation>) {
        if self.layer != Layer::Abstractions {
            return;
        }

        if file_path.extension().and_then(|e| e.to_str()) == Some(IMPL_EXTENSION) {
            out.push(Violation::new(
                file_path.to_path_buf(),
                "ABSTRACTIONS LAYER VIOLATION - Implementation file (.cpp) \
                 not allowed in abstractions",
            ));
        }
    }
}
