//! Plain-text rendering of projection and tax results.

use forecast_core::calculations::common::round_half_up;
use forecast_core::{MONTHS_PER_YEAR, NetIncomeBreakdown, ProjectionResult};
use rust_decimal::Decimal;

pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month-by-month before/after table with a totals row.
pub fn projection_table(result: &ProjectionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6}{:>14}{:>14}{:>14}\n",
        "Month", "Before", "After", "Delta"
    ));

    for (month, name) in MONTH_NAMES.iter().enumerate() {
        let before = result.before[month];
        let after = result.after[month];
        out.push_str(&format!(
            "{name:<6}{before:>14}{after:>14}{:>14}\n",
            after - before
        ));
    }

    let before = result.annual_before();
    let after = result.annual_after();
    out.push_str(&format!(
        "{:<6}{before:>14}{after:>14}{:>14}\n",
        "Total",
        after - before
    ));
    out
}

/// One line per charge, gross to net, with the monthly equivalent.
pub fn breakdown_summary(breakdown: &NetIncomeBreakdown) -> String {
    let monthly =
        round_half_up(breakdown.net_income / Decimal::from(MONTHS_PER_YEAR as u32));
    format!(
        "Gross annual revenue: {:>14}\n\
         Social contributions: {:>14}\n\
         Income tax:           {:>14}\n\
         Corporate tax:        {:>14}\n\
         Dividend flat tax:    {:>14}\n\
         Net annual income:    {:>14}\n\
         Net monthly income:   {:>14}\n",
        breakdown.annual_revenue,
        breakdown.social_contributions,
        breakdown.income_tax,
        breakdown.corporate_tax,
        breakdown.dividend_tax,
        breakdown.net_income,
        monthly,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn projection_table_lists_every_month_and_a_total() {
        let result = ProjectionResult {
            before: [dec!(1000); MONTHS_PER_YEAR],
            after: [dec!(900); MONTHS_PER_YEAR],
        };

        let table = projection_table(&result);

        for name in MONTH_NAMES {
            assert!(table.contains(name), "missing {name}");
        }
        assert!(table.contains("Total"));
        assert!(table.contains("12000"));
        assert!(table.contains("10800"));
    }

    #[test]
    fn breakdown_summary_includes_the_monthly_figure() {
        let breakdown = NetIncomeBreakdown {
            annual_revenue: dec!(60000),
            social_contributions: dec!(15360),
            income_tax: dec!(6600),
            corporate_tax: Decimal::ZERO,
            dividend_tax: Decimal::ZERO,
            net_income: dec!(38040),
        };

        let summary = breakdown_summary(&breakdown);

        assert!(summary.contains("38040"));
        assert!(summary.contains("3170")); // 38040 / 12
    }

    #[test]
    fn month_names_cover_the_whole_year() {
        assert_eq!(MONTH_NAMES.len(), 12);
    }
}
