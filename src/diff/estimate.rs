//! Conservative size estimation for prompt payloads.

/// Characters counted per estimated unit.
///
/// Diff syntax tokenizes denser than prose, so this is lower than the usual
/// ~4 characters per token. The estimate over-counts rather than under-counts.
pub const CHARS_PER_UNIT: usize = 3;

/// Estimate how many units `text` will consume: `ceil(len / 3)`.
///
/// Length is measured in bytes. For ASCII this equals the character count;
/// for multi-byte text it only makes the estimate larger, which keeps it a
/// safe upper bound.
pub fn estimate_units(text: &str) -> usize {
    units_for_len(text.len())
}

/// Estimate for a text of `len` bytes without materializing it.
pub(crate) fn units_for_len(len: usize) -> usize {
    len.div_ceil(CHARS_PER_UNIT)
}
