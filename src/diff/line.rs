//! Line classification for unified diffs.

/// Role of a single unified-diff line, decided by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `diff --git a/<old> b/<new>`
    FileHeader,
    /// `--- a/<old>`
    OldMarker,
    /// `+++ b/<new>`
    NewMarker,
    Addition,
    Deletion,
    /// Context, hunk headers, index lines and anything else.
    Other,
}

impl LineKind {
    /// Classify a line. Markers win over additions/deletions so that
    /// `+++`/`---` are never counted as changed lines.
    pub fn of(line: &str) -> Self {
        if line.starts_with("diff --git") {
            LineKind::FileHeader
        } else if line.starts_with("+++") {
            LineKind::NewMarker
        } else if line.starts_with("---") {
            LineKind::OldMarker
        } else if line.starts_with('+') {
            LineKind::Addition
        } else if line.starts_with('-') {
            LineKind::Deletion
        } else {
            LineKind::Other
        }
    }

    /// Lines that identify which files changed.
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            LineKind::FileHeader | LineKind::OldMarker | LineKind::NewMarker
        )
    }

    pub fn is_change(self) -> bool {
        matches!(self, LineKind::Addition | LineKind::Deletion)
    }
}
