//! Dependency checker orchestrating the per-layer scan
//!
//! Owns the compiled rule sets and the violation accumulator for one run.
//! Fully sequential: each file is opened, read, and closed before the next
//! is touched, and an unreadable file is logged and skipped rather than
//! aborting the scan.

use crate::domain::violations::{CheckReport, CheckerResult, Violation};
use crate::rules::{Layer, LayerRules, HEADER_EXTENSION, IMPL_EXTENSION, INCLUDE_TOKEN};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scans the three layer subdirectories of `<root>/src` and accumulates
/// dependency violations
pub struct DependencyChecker {
    root: PathBuf,
    src: PathBuf,
    /// Compiled rule sets, indexed by `Layer` discriminant
    rules: Vec<LayerRules>,
    violations: Vec<Violation>,
    files_scanned: usize,
}

impl DependencyChecker {
    /// Create a checker for the given project root, compiling all three
    /// layer rule sets
    pub fn new<P: AsRef<Path>>(root: P) -> CheckerResult<Self> {
        let root = root.as_ref().to_path_buf();
        let src = root.join("src");

        let rules = Layer::ALL
            .iter()
            .map(|&layer| LayerRules::compile(layer))
            .collect::<CheckerResult<Vec<_>>>()?;

        Ok(Self { root, src, rules, violations: Vec::new(), files_scanned: 0 })
    }

    /// The derived source path (`<root>/src`)
    pub fn src_path(&self) -> &Path {
        &self.src
    }

    /// Scan one layer's subdirectory. Absent directories are silently
    /// skipped.
    pub fn scan_layer(&mut self, layer: Layer) {
        let directory = self.src.join(layer.subdir());

        if !directory.exists() {
            tracing::debug!("Layer directory {} is absent, skipping", directory.display());
            return;
        }

        // Headers first, then implementation files, each pass in sorted
        // recursive order so repeated runs report in identical order.
        for extension in [HEADER_EXTENSION, IMPL_EXTENSION] {
            for file in collect_files(&directory, extension) {
                self.check_file(&file, layer);
            }
        }
    }

    /// Scan all three layers in the fixed order
    pub fn scan_all(&mut self) {
        for layer in Layer::ALL {
            self.scan_layer(layer);
        }
    }

    /// Check a single file against one layer's rules
    pub fn check_file(&mut self, file_path: &Path, layer: Layer) {
        let relative = self.relative_path(file_path);
        let rules = &self.rules[layer as usize];

        self.files_scanned += 1;

        // Runs before the content is read so an unreadable implementation
        // file in the abstractions layer is still flagged.
        rules.evaluate_file_name(&relative, &mut self.violations);

        let bytes = match fs::read(file_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", file_path.display(), e);
                return;
            }
        };

        // Best-effort decoding: invalid UTF-8 is replaced, never fatal.
        let content = String::from_utf8_lossy(&bytes);

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if !trimmed.starts_with(INCLUDE_TOKEN) {
                continue;
            }

            let line_number = (index + 1) as u32;
            rules.evaluate_line(&relative, line_number, trimmed, &mut self.violations);
        }
    }

    /// Violations accumulated so far, in discovery order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the checker and produce the final report
    pub fn into_report(self) -> CheckReport {
        CheckReport { violations: self.violations, files_scanned: self.files_scanned }
    }

    fn relative_path(&self, file_path: &Path) -> PathBuf {
        file_path.strip_prefix(&self.root).unwrap_or(file_path).to_path_buf()
    }
}

/// Recursively collect files with the given extension, sorted by file name
fn collect_files(directory: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect()
}
