//! Selective truncation: keep file identity, drop most of the body.

use super::estimate::{estimate_units, units_for_len};
use super::line::LineKind;

/// Hard cap on changed lines considered for the excerpt, applied before
/// any budgeting.
pub const MAX_CHANGED_LINES: usize = 100;

/// Appended to every truncated excerpt.
pub const TRUNCATION_MARKER: &str = "... (diff truncated - showing key changes only)";

/// Characters kept per unit when the excerpt has to be hard-cut.
const HARD_CUT_CHARS_PER_UNIT: usize = 2;

/// Lines of a diff split by role, in document order.
#[derive(Debug, Default)]
pub(crate) struct CollectedLines<'a> {
    pub critical: Vec<&'a str>,
    pub changed: Vec<&'a str>,
}

pub(crate) fn collect_lines(diff: &str) -> CollectedLines<'_> {
    let mut collected = CollectedLines::default();

    for line in diff.split('\n') {
        let kind = LineKind::of(line);
        if kind.is_critical() {
            collected.critical.push(line);
        } else if kind.is_change() && collected.changed.len() < MAX_CHANGED_LINES {
            collected.changed.push(line);
        }
    }

    collected
}

/// Reduce `diff` so its estimate fits within `max_units` where possible.
///
/// Returns the diff unchanged when it already fits. Otherwise the result is
/// every file header and marker line, then as many of the first
/// [`MAX_CHANGED_LINES`] changed lines as fit, then [`TRUNCATION_MARKER`].
/// The loop stops at the first changed line that would overflow.
///
/// If the header lines alone exceed the budget, the excerpt is cut to
/// `max_units * 2` characters. The result is therefore bounded in size but
/// not guaranteed to fit `max_units`; callers must re-check.
pub fn truncate(diff: &str, max_units: usize) -> String {
    if estimate_units(diff) <= max_units {
        return diff.to_string();
    }

    let CollectedLines { critical, changed } = collect_lines(diff);

    let mut excerpt = critical.join("\n");

    for line in changed {
        let separator = usize::from(!excerpt.is_empty());
        let next_len = excerpt.len() + separator + line.len();
        if units_for_len(next_len) > max_units {
            break;
        }
        if separator == 1 {
            excerpt.push('\n');
        }
        excerpt.push_str(line);
    }

    if estimate_units(&excerpt) > max_units {
        let mut end = max_units.saturating_mul(HARD_CUT_CHARS_PER_UNIT).min(excerpt.len());
        while end > 0 && !excerpt.is_char_boundary(end) {
            end -= 1;
        }
        excerpt.truncate(end);
    }

    excerpt.push_str("\n\n");
    excerpt.push_str(TRUNCATION_MARKER);
    excerpt
}
