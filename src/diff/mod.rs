//! Diff size management for the text generation prompt.
//!
//! A raw unified diff can be far larger than the generator accepts. This
//! module estimates its size, then picks one of three representations:
//! the diff itself, a truncated excerpt that keeps every file header, or a
//! fixed-size statistical summary.

pub mod budget;
pub mod estimate;
pub mod line;
pub mod summary;
pub mod truncate;

pub use budget::{BudgetThresholds, Representation, Strategy, select_representation, select_representation_with};
pub use estimate::estimate_units;
pub use line::LineKind;
pub use summary::{DiffStats, file_types, summarize};
pub use truncate::{MAX_CHANGED_LINES, TRUNCATION_MARKER, truncate};
