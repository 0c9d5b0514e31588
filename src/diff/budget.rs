//! Budget policy: choose how much of a diff the generator gets to see.

use std::fmt;

use tracing::debug;

use super::estimate::estimate_units;
use super::summary::summarize;
use super::truncate::truncate;

/// Above this estimate the diff is summarized outright.
pub const SUMMARIZE_ABOVE: usize = 10_000;
/// Above this estimate the diff is truncated to [`TRUNCATE_LARGE_BUDGET`].
pub const TRUNCATE_LARGE_ABOVE: usize = 6_000;
pub const TRUNCATE_LARGE_BUDGET: usize = 6_000;
/// Above this estimate the diff is truncated to [`TRUNCATE_MEDIUM_BUDGET`].
pub const TRUNCATE_MEDIUM_ABOVE: usize = 4_000;
pub const TRUNCATE_MEDIUM_BUDGET: usize = 4_000;
/// Any representation still larger than this is replaced by the summary.
pub const SAFETY_NET: usize = 8_000;

/// Unit thresholds applied, in order, by [`select_representation_with`].
///
/// The defaults are empirical and tied to the generator's input ceiling;
/// retune them together if the generator changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetThresholds {
    pub summarize_above: usize,
    pub truncate_large_above: usize,
    pub truncate_large_budget: usize,
    pub truncate_medium_above: usize,
    pub truncate_medium_budget: usize,
    pub safety_net: usize,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            summarize_above: SUMMARIZE_ABOVE,
            truncate_large_above: TRUNCATE_LARGE_ABOVE,
            truncate_large_budget: TRUNCATE_LARGE_BUDGET,
            truncate_medium_above: TRUNCATE_MEDIUM_ABOVE,
            truncate_medium_budget: TRUNCATE_MEDIUM_BUDGET,
            safety_net: SAFETY_NET,
        }
    }
}

impl BudgetThresholds {
    /// Map an estimate to the strategy that should handle it.
    pub fn strategy_for(&self, units: usize) -> Strategy {
        if units > self.summarize_above {
            Strategy::Summarize
        } else if units > self.truncate_large_above {
            Strategy::Truncate {
                budget: self.truncate_large_budget,
            }
        } else if units > self.truncate_medium_above {
            Strategy::Truncate {
                budget: self.truncate_medium_budget,
            }
        } else {
            Strategy::Verbatim
        }
    }
}

/// How a diff is turned into prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Verbatim,
    Truncate { budget: usize },
    Summarize,
}

impl Strategy {
    pub fn apply(self, diff: &str) -> Representation {
        match self {
            Strategy::Verbatim => Representation::Verbatim(diff.to_string()),
            Strategy::Truncate { budget } => Representation::Truncated(truncate(diff, budget)),
            Strategy::Summarize => Representation::Summary(summarize(diff)),
        }
    }
}

/// The text handed to the generator, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    Verbatim(String),
    Truncated(String),
    Summary(String),
}

impl Representation {
    pub fn text(&self) -> &str {
        match self {
            Representation::Verbatim(text)
            | Representation::Truncated(text)
            | Representation::Summary(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Representation::Verbatim(text)
            | Representation::Truncated(text)
            | Representation::Summary(text) => text,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Representation::Verbatim(_) => "verbatim",
            Representation::Truncated(_) => "truncated",
            Representation::Summary(_) => "summary",
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, Representation::Summary(_))
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Select the representation of `diff` using the default thresholds.
pub fn select_representation(diff: &str) -> Representation {
    select_representation_with(diff, &BudgetThresholds::default())
}

/// Select the representation of `diff`.
///
/// The strategy is picked from the estimate of the original diff. Whatever
/// it produces is estimated again, and anything above the safety net is
/// replaced by the summary, which is the one representation whose size is
/// bounded regardless of input.
pub fn select_representation_with(diff: &str, thresholds: &BudgetThresholds) -> Representation {
    let units = estimate_units(diff);
    let strategy = thresholds.strategy_for(units);
    let representation = strategy.apply(diff);

    let final_units = estimate_units(representation.text());
    if final_units > thresholds.safety_net && !representation.is_summary() {
        debug!(
            units,
            final_units,
            safety_net = thresholds.safety_net,
            "Representation exceeds safety net, falling back to summary"
        );
        return Representation::Summary(summarize(diff));
    }

    debug!(
        units,
        final_units,
        kind = representation.kind(),
        "Selected diff representation"
    );
    representation
}
