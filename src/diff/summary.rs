//! Structural summary of a diff whose size does not grow with the input.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

use super::line::LineKind;

/// Number of file paths listed by name in the summary.
const LISTED_FILES: usize = 5;

/// Maximum number of distinct file types reported.
const MAX_FILE_TYPES: usize = 5;

/// Extensions this long or longer are reported as `other`.
const MAX_EXTENSION_LEN: usize = 6;

static FILE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^diff --git a/(.+) b/(.+)").expect("file header pattern is valid")
});

/// Counts derived from a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub file_count: usize,
    pub additions: usize,
    pub deletions: usize,
    /// New-side paths in header order.
    pub files: Vec<String>,
}

impl DiffStats {
    /// Scan `diff` once and count files, additions and deletions.
    ///
    /// Only header lines matching `diff --git a/<old> b/<new>` count as
    /// files, and the `<new>` path is recorded so renames report their
    /// destination.
    pub fn from_diff(diff: &str) -> Self {
        let mut stats = DiffStats::default();

        for line in diff.split('\n') {
            match LineKind::of(line) {
                LineKind::FileHeader => {
                    if let Some(path) = new_path(line) {
                        stats.files.push(path.to_string());
                        stats.file_count += 1;
                    }
                }
                LineKind::Addition => stats.additions += 1,
                LineKind::Deletion => stats.deletions += 1,
                _ => {}
            }
        }

        stats
    }

    /// Distinct file types of the changed files. See [`file_types`].
    pub fn file_types(&self) -> Vec<String> {
        file_types(&self.files)
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "COMMIT: {} files, +{}/-{} lines",
            self.file_count, self.additions, self.deletions
        )?;

        let listed: Vec<&str> = self
            .files
            .iter()
            .take(LISTED_FILES)
            .map(String::as_str)
            .collect();
        write!(f, "Files: {}", listed.join(", "))?;
        if self.files.len() > LISTED_FILES {
            write!(f, " and {} more", self.files.len() - LISTED_FILES)?;
        }
        writeln!(f)?;

        write!(f, "Types: {}", self.file_types().join(", "))
    }
}

fn new_path(header: &str) -> Option<&str> {
    let header = header.trim_end_matches('\r');
    FILE_HEADER
        .captures(header)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Infer up to five distinct file types from a list of paths.
///
/// The type is whatever follows the last `.` (the whole name when there is
/// no dot). Empty types and types of six or more characters become
/// `other`. First-seen order is kept. With no files the result is
/// `["mixed"]`.
pub fn file_types<S: AsRef<str>>(files: &[S]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();

    for file in files {
        let ext = file.as_ref().rsplit('.').next().unwrap_or_default();
        let ext = if ext.is_empty() || ext.chars().count() >= MAX_EXTENSION_LEN {
            "other"
        } else {
            ext
        };

        if !types.iter().any(|t| t == ext) {
            types.push(ext.to_string());
            if types.len() == MAX_FILE_TYPES {
                break;
            }
        }
    }

    if types.is_empty() {
        types.push("mixed".to_string());
    }

    types
}

/// Render a fixed-shape summary of `diff`:
///
/// ```text
/// COMMIT: 3 files, +10/-2 lines
/// Files: src/a.rs, src/b.rs, README.md
/// Types: rs, md
/// ```
///
/// The output size depends only on the first few file names and on the
/// digits of the counts, so this is always safe to call on huge diffs.
pub fn summarize(diff: &str) -> String {
    DiffStats::from_diff(diff).to_string()
}
