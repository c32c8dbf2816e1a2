//! Engine run metrics.
//!
//! Every run records one [`PassMetrics`] per executed pass (one per rule, two
//! per rule in preserve-case mode). They are cheap to collect and are what the
//! CLI report prints; callers that only want the text use [`crate::apply`].
//!
//! Unlike the [`crate::ReplacementLog`], metrics are always collected and
//! include passes that matched nothing.

use super::compiled_rule::Variant;
use crate::ReplacementLog;
use std::time::Duration;

/// Timing and match count for a single rule pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassMetrics {
    /// Zero-based index of the rule in its set.
    pub rule_index: usize,
    /// True for the second, first-letter-capitalized pass of preserve-case mode.
    pub capitalized: bool,
    /// Matches found in the subject before the pass replaced them.
    pub matches: usize,
    pub duration: Duration,
}

impl PassMetrics {
    pub(crate) fn new(rule_index: usize, variant: Variant, matches: usize, duration: Duration) -> Self {
        PassMetrics { rule_index, capitalized: variant == Variant::Capitalized, matches, duration }
    }
}

/// Engine output bundled with timing information.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Final subject after every pass.
    pub result: String,
    /// Audit log; empty unless logging was requested.
    pub log: ReplacementLog,
    /// Per-pass trace in execution order.
    pub passes: Vec<PassMetrics>,
    /// Total elapsed time for the run.
    pub total: Duration,
}

impl RunMetrics {
    /// Passes that matched at least once.
    pub fn productive_passes(&self) -> impl Iterator<Item = &PassMetrics> {
        self.passes.iter().filter(|p| p.matches > 0)
    }
}
