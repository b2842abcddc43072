use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: usize = 12;

/// Two parallel 12-month revenue series, indexed 0 (January) through 11
/// (December).
///
/// A pure function output: recompute on every input change, never mutate
/// in place. Callers that need caching should memoize on the identity of
/// `(clients, params, profile)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Unmodified portfolio revenue, never scenario-adjusted.
    pub before: [Decimal; MONTHS_PER_YEAR],
    /// Scenario-adjusted revenue; every entry is >= 0.
    pub after: [Decimal; MONTHS_PER_YEAR],
}

impl ProjectionResult {
    pub fn annual_before(&self) -> Decimal {
        self.before.iter().copied().sum()
    }

    pub fn annual_after(&self) -> Decimal {
        self.after.iter().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn annual_totals_sum_all_twelve_months() {
        let result = ProjectionResult {
            before: [dec!(100); MONTHS_PER_YEAR],
            after: [dec!(50); MONTHS_PER_YEAR],
        };

        assert_eq!(result.annual_before(), dec!(1200));
        assert_eq!(result.annual_after(), dec!(600));
    }
}
