use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier for a client record.
///
/// Scenario parameters reference clients by id rather than by position in
/// the portfolio, so reordering or filtering the list cannot retarget a
/// scenario at the wrong client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClientId(pub i64);

/// Inclusive range of month indices (0 = January, 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: usize,
    pub end: usize,
}

impl MonthWindow {
    pub fn contains(&self, month: usize) -> bool {
        month >= self.start && month <= self.end
    }

    /// Number of months covered by the window, never less than 1.
    pub fn months(&self) -> usize {
        if self.end < self.start {
            1
        } else {
            self.end - self.start + 1
        }
    }
}

/// How a rate-based client's workload is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkSchedule {
    /// Days worked per week, as a fraction of a 5-day week.
    WeeklyDays(Decimal),
    /// Total days worked per year, spread evenly across the 12 months.
    AnnualDays(Decimal),
}

/// Billing arrangement for a single client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Billing {
    /// Billed per day worked at a fixed daily rate.
    DailyRate {
        daily_rate: Decimal,
        schedule: WorkSchedule,
        window: Option<MonthWindow>,
    },
    /// Fixed amount invoiced every month regardless of days worked.
    Retainer { monthly_amount: Decimal },
    /// One total contract amount spread evenly across a month range.
    FixedPrice {
        total_amount: Decimal,
        window: MonthWindow,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub billing: Billing,
    /// Inactive clients contribute zero revenue in every month.
    pub active: bool,
    /// Display color for the hosting application; never read by the engine.
    pub color: String,
}

impl Client {
    pub fn is_rate_based(&self) -> bool {
        matches!(self.billing, Billing::DailyRate { .. })
    }

    pub fn is_retainer(&self) -> bool {
        matches!(self.billing, Billing::Retainer { .. })
    }
}
