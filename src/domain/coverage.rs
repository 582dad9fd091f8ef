use super::dates::{TimeUnit, elapsed_between};
use super::employer::EmployerRecord;
use chrono::NaiveDate;
use tracing::debug;

/// Three years of employment, counted in days.
pub const DEFAULT_MINIMUM_SPAN_DAYS: i64 = 365 * 3;

/// Binary outcome of the coverage rule for a whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
}

impl Verdict {
    pub const VALID: Self = Self { valid: true };
    pub const INVALID: Self = Self { valid: false };
}

/// The continuous-coverage rule applied to a declared employment history.
///
/// Two or more disclosed employers always satisfy the rule, whatever their
/// individual spans. A single employer must have a known start date and cover
/// at least `minimum_span_days` up to its end date, or up to today when it has
/// none. No employers never satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageRule {
    pub minimum_span_days: i64,
}

impl Default for CoverageRule {
    fn default() -> Self {
        Self {
            minimum_span_days: DEFAULT_MINIMUM_SPAN_DAYS,
        }
    }
}

impl CoverageRule {
    pub fn new(minimum_span_days: i64) -> Self {
        Self { minimum_span_days }
    }

    /// Whether one employer alone covers the minimum span.
    pub fn single_employer_sufficient(&self, employer: &EmployerRecord, today: NaiveDate) -> bool {
        match employer.start_date {
            Some(start) => {
                elapsed_between(TimeUnit::Day, start, employer.end_date, today)
                    >= self.minimum_span_days
            }
            None => false,
        }
    }

    /// Applies the rule. Order of `employers` is irrelevant.
    pub fn validate(&self, employers: &[EmployerRecord], today: NaiveDate) -> Verdict {
        let verdict = match employers {
            [] => Verdict::INVALID,
            [only] => {
                if self.single_employer_sufficient(only, today) {
                    Verdict::VALID
                } else {
                    Verdict::INVALID
                }
            }
            _ => Verdict::VALID,
        };
        debug!(
            employers = employers.len(),
            valid = verdict.valid,
            "coverage rule evaluated"
        );
        verdict
    }
}
