//! Per-client revenue formulas.
//!
//! One method per question the simulator asks: what does this client pay in
//! a given month, and what is its season-neutral monthly average. All
//! monetary outputs are rounded half-up to two decimal places.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::calendar;
use crate::calculations::common::round_half_up;
use crate::models::{Billing, Client, MONTHS_PER_YEAR, WorkSchedule};

/// Month-by-month demand multipliers for rate-based revenue, January
/// through December: the summer slump (August at 0.6), the autumn rebound.
///
/// The curve sums to exactly 12.0, so a season-neutral client earns the
/// same over a year whether projected month-by-month or from its baseline.
pub const SEASONALITY: [Decimal; MONTHS_PER_YEAR] = [
    dec!(1.0),
    dec!(1.0),
    dec!(1.1),
    dec!(1.05),
    dec!(1.0),
    dec!(0.95),
    dec!(0.8),
    dec!(0.6),
    dec!(1.15),
    dec!(1.2),
    dec!(1.15),
    dec!(1.0),
];

/// Reference working week used to interpret `WorkSchedule::WeeklyDays`.
pub const FULL_WEEK_DAYS: Decimal = dec!(5);

/// Revenue formulas for one calendar year.
///
/// Snapshots the business-day counts once; every method is then a pure
/// function of its arguments.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::models::{Billing, Client, ClientId, WorkSchedule};
/// use forecast_core::calculations::revenue::RevenueModel;
///
/// let client = Client {
///     id: ClientId(1),
///     name: "Acme".into(),
///     billing: Billing::DailyRate {
///         daily_rate: dec!(500),
///         schedule: WorkSchedule::WeeklyDays(dec!(5)),
///         window: None,
///     },
///     active: true,
///     color: "#2563eb".into(),
/// };
///
/// let model = RevenueModel::for_year(2025);
/// // January 2025 has 23 business days.
/// assert_eq!(model.monthly_revenue(&client, 0, dec!(1.0)), dec!(11500));
/// // Season-neutral baseline uses the annual average of 21.75 days.
/// assert_eq!(model.baseline_monthly_revenue(&client), dec!(10875));
/// ```
#[derive(Debug, Clone)]
pub struct RevenueModel {
    business_days: [u32; MONTHS_PER_YEAR],
    average_business_days: Decimal,
}

impl RevenueModel {
    pub fn for_year(year: i32) -> Self {
        Self {
            business_days: calendar::business_days_per_month(year),
            average_business_days: calendar::average_business_days(year),
        }
    }

    pub fn business_days(&self) -> &[u32; MONTHS_PER_YEAR] {
        &self.business_days
    }

    /// Revenue of one client for one month under a seasonality multiplier.
    ///
    /// Returns zero for inactive clients, months outside the client's
    /// active window, and month indices outside 0-11.
    pub fn monthly_revenue(
        &self,
        client: &Client,
        month: usize,
        seasonality: Decimal,
    ) -> Decimal {
        if !client.active || month >= MONTHS_PER_YEAR {
            return Decimal::ZERO;
        }

        let raw = match &client.billing {
            Billing::DailyRate {
                daily_rate,
                schedule,
                window,
            } => {
                if let Some(window) = window {
                    if !window.contains(month) {
                        return Decimal::ZERO;
                    }
                }
                match schedule {
                    WorkSchedule::AnnualDays(days) => {
                        *daily_rate * (*days / Decimal::from(MONTHS_PER_YEAR as u32)) * seasonality
                    }
                    // The only billing mode sensitive to the actual calendar.
                    WorkSchedule::WeeklyDays(days) => {
                        *daily_rate
                            * (*days / FULL_WEEK_DAYS)
                            * Decimal::from(self.business_days[month])
                            * seasonality
                    }
                }
            }
            // Flat fee regardless of days worked; seasonality and calendar
            // do not apply.
            Billing::Retainer { monthly_amount } => *monthly_amount,
            Billing::FixedPrice {
                total_amount,
                window,
            } => {
                if !window.contains(month) {
                    return Decimal::ZERO;
                }
                *total_amount / Decimal::from(window.months() as u64)
            }
        };

        round_half_up(raw)
    }

    /// Season-neutral monthly average for one client: seasonality fixed at
    /// 1 and, for weekly-day schedules, the annual average business-day
    /// count in place of any specific month's count.
    pub fn baseline_monthly_revenue(&self, client: &Client) -> Decimal {
        if !client.active {
            return Decimal::ZERO;
        }

        let raw = match &client.billing {
            Billing::DailyRate {
                daily_rate,
                schedule,
                ..
            } => match schedule {
                WorkSchedule::AnnualDays(days) => {
                    *daily_rate * (*days / Decimal::from(MONTHS_PER_YEAR as u32))
                }
                WorkSchedule::WeeklyDays(days) => {
                    *daily_rate * (*days / FULL_WEEK_DAYS) * self.average_business_days
                }
            },
            Billing::Retainer { monthly_amount } => *monthly_amount,
            Billing::FixedPrice {
                total_amount,
                window,
            } => *total_amount / Decimal::from(window.months() as u64),
        };

        round_half_up(raw)
    }

    /// Portfolio revenue over all 12 months under the standard seasonality
    /// curve.
    pub fn annual_revenue(&self, clients: &[Client]) -> Decimal {
        let mut total = Decimal::ZERO;
        for (month, seasonality) in SEASONALITY.iter().enumerate() {
            for client in clients {
                total += self.monthly_revenue(client, month, *seasonality);
            }
        }
        total
    }
}
