//! Before/after 12-month portfolio projection.
//!
//! `before` is the unmodified portfolio under the standard seasonality
//! curve; `after` applies the scenario deltas with per-billing-type rules:
//! rate changes and day-count changes touch rate-based clients only,
//! vacations spare retainers, a lost client vanishes for the whole year,
//! and new clients ramp in over three months.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::common::{checked_ratio, round_half_up};
use crate::calculations::revenue::{RevenueModel, SEASONALITY};
use crate::models::{Client, MONTHS_PER_YEAR, Profile, ProjectionResult, SimulationParams};

/// Fixed weeks-to-months divisor for the vacation rule (approximation of
/// 52 weeks / 12 months). It directly determines which month absorbs the
/// partial-vacation prorate, so it is a named constant rather than a
/// re-derived value.
pub const WEEKS_PER_MONTH: Decimal = dec!(4.33);

/// First month index affected by the staged rate change.
pub const STAGED_RATE_CHANGE_MONTH: usize = 2;

const PERCENT: Decimal = dec!(100);

/// Vacation expressed as whole months plus a fractional remainder,
/// consumed from January upward.
#[derive(Debug, Clone, Copy)]
struct VacationSpan {
    full_months: usize,
    fraction: Decimal,
}

impl VacationSpan {
    fn from_weeks(weeks: Decimal) -> Self {
        if weeks <= Decimal::ZERO {
            return Self {
                full_months: 0,
                fraction: Decimal::ZERO,
            };
        }
        let months = weeks / WEEKS_PER_MONTH;
        let whole = months.floor();
        Self {
            full_months: whole.to_usize().unwrap_or(MONTHS_PER_YEAR),
            fraction: months - whole,
        }
    }

    /// Multiplier for one month: 0 inside the vacation, `1 - fraction` for
    /// the single partially-off month, 1 everywhere else.
    fn factor(&self, month: usize) -> Decimal {
        if month < self.full_months {
            Decimal::ZERO
        } else if month == self.full_months {
            Decimal::ONE - self.fraction
        } else {
            Decimal::ONE
        }
    }
}

/// Monthly fixed expenses with the scenario delta applied; consumed by
/// callers deriving take-home figures, never by the revenue series.
pub fn adjusted_monthly_expenses(profile: &Profile, params: &SimulationParams) -> Decimal {
    round_half_up(profile.monthly_expenses + params.expense_delta)
}

/// Projects a client portfolio into parallel before/after revenue series.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::models::{Billing, Client, ClientId, Profile, SimulationParams};
/// use forecast_core::calculations::scenario::ScenarioSimulator;
///
/// let clients = vec![Client {
///     id: ClientId(1),
///     name: "Studio".into(),
///     billing: Billing::Retainer { monthly_amount: dec!(3000) },
///     active: true,
///     color: "#16a34a".into(),
/// }];
///
/// let simulator = ScenarioSimulator::for_year(2025);
/// let result = simulator.project(&clients, &SimulationParams::default(), &Profile::default());
///
/// // Neutral parameters leave the two series identical.
/// assert_eq!(result.before, result.after);
/// assert_eq!(result.annual_after(), dec!(36000));
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioSimulator {
    revenue: RevenueModel,
}

impl ScenarioSimulator {
    pub fn new(revenue: RevenueModel) -> Self {
        Self { revenue }
    }

    pub fn for_year(year: i32) -> Self {
        Self::new(RevenueModel::for_year(year))
    }

    pub fn revenue_model(&self) -> &RevenueModel {
        &self.revenue
    }

    pub fn project(
        &self,
        clients: &[Client],
        params: &SimulationParams,
        profile: &Profile,
    ) -> ProjectionResult {
        let vacation = VacationSpan::from_weeks(params.vacation_weeks);
        let new_client_base = self.new_client_monthly_base(clients, params);

        let mut before = [Decimal::ZERO; MONTHS_PER_YEAR];
        let mut after = [Decimal::ZERO; MONTHS_PER_YEAR];

        for month in 0..MONTHS_PER_YEAR {
            let seasonality = SEASONALITY[month];
            let mut before_total = Decimal::ZERO;
            let mut after_total = Decimal::ZERO;

            for client in clients {
                let base = self.revenue.monthly_revenue(client, month, seasonality);
                before_total += base;

                // A lost client contributes nothing in any month.
                if params.lost_client == Some(client.id) {
                    continue;
                }
                after_total +=
                    self.adjusted_client_revenue(client, base, month, params, profile, vacation);
            }

            after_total += new_client_base * ramp_factor(month) * seasonality;

            if after_total < Decimal::ZERO {
                warn!(
                    month,
                    total = %after_total,
                    "combined adjustments drove revenue negative; clamping to zero"
                );
                after_total = Decimal::ZERO;
            }

            before[month] = round_half_up(before_total);
            after[month] = round_half_up(after_total);
        }

        ProjectionResult { before, after }
    }

    /// Scenario adjustments for one client's month, starting from its
    /// unmodified revenue.
    fn adjusted_client_revenue(
        &self,
        client: &Client,
        base: Decimal,
        month: usize,
        params: &SimulationParams,
        profile: &Profile,
        vacation: VacationSpan,
    ) -> Decimal {
        let mut revenue = base;

        if client.is_rate_based() {
            revenue *= Decimal::ONE + params.rate_change_pct / PERCENT;

            if params.rate_change_after_pct > Decimal::ZERO && month >= STAGED_RATE_CHANGE_MONTH {
                revenue *= Decimal::ONE + params.rate_change_after_pct / PERCENT;
            }

            if let Some(days) = params.weekly_days {
                if days < profile.weekly_working_days {
                    match checked_ratio(days, profile.weekly_working_days) {
                        Some(ratio) => revenue *= ratio,
                        None => warn!(
                            "profile has zero weekly working days; skipping day-count scaling"
                        ),
                    }
                }
            }
        }

        // Retainer clients keep paying during time off.
        if !client.is_retainer() {
            revenue *= vacation.factor(month);
        }

        revenue
    }

    /// Combined season-neutral monthly revenue of the ramped-in clients:
    /// count times the average baseline of the surviving active portfolio.
    fn new_client_monthly_base(&self, clients: &[Client], params: &SimulationParams) -> Decimal {
        if params.new_clients == 0 {
            return Decimal::ZERO;
        }

        let existing: Vec<&Client> = clients
            .iter()
            .filter(|c| c.active && params.lost_client != Some(c.id))
            .collect();

        let total: Decimal = existing
            .iter()
            .map(|c| self.revenue.baseline_monthly_revenue(c))
            .sum();

        match checked_ratio(total, Decimal::from(existing.len() as u64)) {
            Some(average) => Decimal::from(params.new_clients) * average,
            None => {
                warn!("no existing clients to average; new-client ramp contributes nothing");
                Decimal::ZERO
            }
        }
    }
}

/// Three-month onboarding ramp: 1/3 of full revenue in month 0, 2/3 in
/// month 1, full from month 2 on.
fn ramp_factor(month: usize) -> Decimal {
    (Decimal::from(month as u64 + 1) / dec!(3)).min(Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::{Billing, ClientId, MonthWindow, WorkSchedule};

    use super::*;

    fn daily_client(id: i64, daily_rate: Decimal) -> Client {
        Client {
            id: ClientId(id),
            name: format!("daily-{id}"),
            billing: Billing::DailyRate {
                daily_rate,
                schedule: WorkSchedule::WeeklyDays(dec!(5)),
                window: None,
            },
            active: true,
            color: "#ff0000".into(),
        }
    }

    fn annual_days_client(id: i64, daily_rate: Decimal, days: Decimal) -> Client {
        Client {
            id: ClientId(id),
            name: format!("annual-{id}"),
            billing: Billing::DailyRate {
                daily_rate,
                schedule: WorkSchedule::AnnualDays(days),
                window: None,
            },
            active: true,
            color: "#ff8800".into(),
        }
    }

    fn retainer_client(id: i64, amount: Decimal) -> Client {
        Client {
            id: ClientId(id),
            name: format!("retainer-{id}"),
            billing: Billing::Retainer {
                monthly_amount: amount,
            },
            active: true,
            color: "#00ff00".into(),
        }
    }

    fn fixed_price_client(id: i64, total: Decimal) -> Client {
        Client {
            id: ClientId(id),
            name: format!("fixed-{id}"),
            billing: Billing::FixedPrice {
                total_amount: total,
                window: MonthWindow { start: 0, end: 11 },
            },
            active: true,
            color: "#0000ff".into(),
        }
    }

    fn simulator() -> ScenarioSimulator {
        ScenarioSimulator::for_year(2025)
    }

    // =========================================================================
    // neutral scenario
    // =========================================================================

    #[test]
    fn neutral_params_leave_before_and_after_identical() {
        let clients = vec![
            daily_client(1, dec!(500)),
            retainer_client(2, dec!(3000)),
            fixed_price_client(3, dec!(24000)),
        ];

        let result = simulator().project(&clients, &SimulationParams::default(), &Profile::default());

        assert_eq!(result.before, result.after);
    }

    #[test]
    fn before_series_is_never_scenario_adjusted() {
        let clients = vec![daily_client(1, dec!(500)), retainer_client(2, dec!(3000))];
        let heavy = SimulationParams {
            vacation_weeks: dec!(8),
            rate_change_pct: dec!(-50),
            lost_client: Some(ClientId(1)),
            new_clients: 2,
            ..SimulationParams::default()
        };

        let neutral = simulator().project(&clients, &SimulationParams::default(), &Profile::default());
        let adjusted = simulator().project(&clients, &heavy, &Profile::default());

        assert_eq!(neutral.before, adjusted.before);
    }

    // =========================================================================
    // rate change rules
    // =========================================================================

    #[test]
    fn rate_change_scales_rate_based_clients_only() {
        let clients = vec![
            annual_days_client(1, dec!(500), dec!(240)),
            retainer_client(2, dec!(3000)),
            fixed_price_client(3, dec!(12000)),
        ];
        let params = SimulationParams {
            rate_change_pct: dec!(10),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // January: daily 10000 -> 11000; retainer 3000 and fixed 1000 untouched.
        assert_eq!(result.before[0], dec!(14000));
        assert_eq!(result.after[0], dec!(15000));
    }

    #[test]
    fn staged_rate_change_skips_the_first_two_months() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240))];
        let params = SimulationParams {
            rate_change_after_pct: dec!(20),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.after[0], result.before[0]);
        assert_eq!(result.after[1], result.before[1]);
        // Month 2: 10000 * 1.1 seasonality * 1.2 staged increase.
        assert_eq!(result.after[2], dec!(13200));
        assert_eq!(result.before[2], dec!(11000));
    }

    #[test]
    fn immediate_and_staged_changes_compound() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240))];
        let params = SimulationParams {
            rate_change_pct: dec!(10),
            rate_change_after_pct: dec!(10),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // Month 0: 10000 * 1.1; month 2: 10000 * 1.1 * 1.1 * 1.1 seasonality.
        assert_eq!(result.after[0], dec!(11000));
        assert_eq!(result.after[2], dec!(13310));
    }

    // =========================================================================
    // hypothetical weekly day count
    // =========================================================================

    #[test]
    fn reduced_weekly_days_scale_rate_based_revenue() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240)), retainer_client(2, dec!(3000))];
        let params = SimulationParams {
            weekly_days: Some(dec!(4)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // Daily client 10000 * 4/5 = 8000; retainer untouched.
        assert_eq!(result.after[0], dec!(11000));
    }

    #[test]
    fn increased_weekly_days_do_not_scale() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240))];
        let params = SimulationParams {
            weekly_days: Some(dec!(6)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.after, result.before);
    }

    #[test]
    fn zero_default_weekly_days_skips_scaling_instead_of_dividing() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240))];
        let profile = Profile {
            weekly_working_days: Decimal::ZERO,
            ..Profile::default()
        };
        let params = SimulationParams {
            weekly_days: Some(dec!(-1)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &profile);

        assert_eq!(result.after, result.before);
    }

    // =========================================================================
    // vacation rule
    // =========================================================================

    #[test]
    fn one_month_vacation_zeroes_january_only() {
        let clients = vec![daily_client(1, dec!(500))];
        let params = SimulationParams {
            vacation_weeks: dec!(4.33),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.after[0], Decimal::ZERO);
        // A non-adjacent month is untouched.
        assert_eq!(result.after[6], result.before[6]);
        assert_eq!(result.after[1], result.before[1]);
    }

    #[test]
    fn fractional_vacation_prorates_the_following_month() {
        let clients = vec![annual_days_client(1, dec!(500), dec!(240))];
        let params = SimulationParams {
            // 6.495 weeks = exactly 1.5 months.
            vacation_weeks: dec!(6.495),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.after[0], Decimal::ZERO);
        assert_eq!(result.after[1], dec!(5000));
        assert_eq!(result.after[2], result.before[2]);
    }

    #[test]
    fn vacation_zeroes_fixed_price_but_not_retainer() {
        let clients = vec![fixed_price_client(1, dec!(12000)), retainer_client(2, dec!(3000))];
        let params = SimulationParams {
            vacation_weeks: dec!(4.33),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // Fixed-price month zeroed, retainer keeps paying.
        assert_eq!(result.after[0], dec!(3000));
        assert_eq!(result.before[0], dec!(4000));
    }

    #[test]
    fn retainer_is_immune_to_any_vacation_length() {
        let clients = vec![retainer_client(1, dec!(3000))];

        for weeks in [dec!(0), dec!(2), dec!(4.33), dec!(20), dec!(52)] {
            let params = SimulationParams {
                vacation_weeks: weeks,
                ..SimulationParams::default()
            };
            let result = simulator().project(&clients, &params, &Profile::default());
            for month in 0..MONTHS_PER_YEAR {
                assert_eq!(result.after[month], dec!(3000), "weeks {weeks} month {month}");
            }
        }
    }

    #[test]
    fn oversized_vacation_zeroes_the_whole_year() {
        let clients = vec![daily_client(1, dec!(500))];
        let params = SimulationParams {
            vacation_weeks: dec!(104),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.after, [Decimal::ZERO; MONTHS_PER_YEAR]);
    }

    // =========================================================================
    // lost client
    // =========================================================================

    #[test]
    fn lost_client_contributes_zero_in_every_month() {
        let clients = vec![daily_client(1, dec!(500)), retainer_client(2, dec!(3000))];
        let params = SimulationParams {
            lost_client: Some(ClientId(1)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        for month in 0..MONTHS_PER_YEAR {
            assert_eq!(result.after[month], dec!(3000), "month {month}");
        }
    }

    #[test]
    fn unknown_lost_client_id_changes_nothing() {
        let clients = vec![retainer_client(1, dec!(3000))];
        let params = SimulationParams {
            lost_client: Some(ClientId(99)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        assert_eq!(result.before, result.after);
    }

    // =========================================================================
    // new-client ramp
    // =========================================================================

    #[test]
    fn new_clients_ramp_over_three_months() {
        let clients = vec![retainer_client(1, dec!(3000)), retainer_client(2, dec!(1000))];
        let params = SimulationParams {
            new_clients: 1,
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // Average baseline 2000; ramp 1/3, 2/3, then 1 with seasonality 1.1 in March.
        assert_eq!(result.after[0], dec!(4666.67));
        assert_eq!(result.after[1], dec!(5333.33));
        assert_eq!(result.after[2], dec!(6200));
    }

    #[test]
    fn ramp_average_excludes_the_lost_client() {
        let clients = vec![retainer_client(1, dec!(3000)), retainer_client(2, dec!(1000))];
        let params = SimulationParams {
            new_clients: 1,
            lost_client: Some(ClientId(1)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        // Surviving portfolio averages 1000; month 2 ramp is full at 1.1 seasonality.
        assert_eq!(result.after[2], dec!(2100));
    }

    #[test]
    fn new_clients_with_empty_portfolio_contribute_nothing() {
        let params = SimulationParams {
            new_clients: 3,
            ..SimulationParams::default()
        };

        let result = simulator().project(&[], &params, &Profile::default());

        assert_eq!(result.after, [Decimal::ZERO; MONTHS_PER_YEAR]);
    }

    // =========================================================================
    // non-negativity
    // =========================================================================

    #[test]
    fn after_never_goes_negative_under_combined_adjustments() {
        let clients = vec![daily_client(1, dec!(500)), fixed_price_client(2, dec!(12000))];
        let params = SimulationParams {
            vacation_weeks: dec!(10),
            rate_change_pct: dec!(-250),
            lost_client: Some(ClientId(2)),
            ..SimulationParams::default()
        };

        let result = simulator().project(&clients, &params, &Profile::default());

        for month in 0..MONTHS_PER_YEAR {
            assert!(result.after[month] >= Decimal::ZERO, "month {month}");
        }
    }

    // =========================================================================
    // expenses
    // =========================================================================

    #[test]
    fn expense_delta_adjusts_profile_expenses() {
        let profile = Profile {
            monthly_expenses: dec!(800),
            ..Profile::default()
        };
        let params = SimulationParams {
            expense_delta: dec!(-150),
            ..SimulationParams::default()
        };

        assert_eq!(adjusted_monthly_expenses(&profile, &params), dec!(650));
    }
}
