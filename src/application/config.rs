use crate::domain::coverage::{CoverageRule, DEFAULT_MINIMUM_SPAN_DAYS};
use crate::infrastructure::simulated::DEFAULT_LATENCY;
use std::time::Duration;

/// Tunables of a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Span a single employer must cover, in days.
    pub minimum_span_days: i64,
    /// Round-trip time of the simulated endpoint.
    pub submission_latency: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            minimum_span_days: DEFAULT_MINIMUM_SPAN_DAYS,
            submission_latency: DEFAULT_LATENCY,
        }
    }
}

impl FormConfig {
    pub fn coverage_rule(&self) -> CoverageRule {
        CoverageRule::new(self.minimum_span_days)
    }
}
