use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ClientId;

/// Scenario deltas applied on top of the current portfolio.
///
/// Ephemeral by design: the hosting application rebuilds this bundle on
/// every user interaction and feeds it to the simulator unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Weeks of vacation taken over the year; may be fractional.
    pub vacation_weeks: Decimal,
    /// Immediate rate change applied to rate-based clients, in percent.
    pub rate_change_pct: Decimal,
    /// Additional staged rate change, in percent, effective from month
    /// index 2 onward.
    pub rate_change_after_pct: Decimal,
    /// Client removed from the "after" scenario, for all 12 months.
    pub lost_client: Option<ClientId>,
    /// Number of new clients ramped in over the first three months.
    pub new_clients: u32,
    /// Hypothetical weekly working days; `None` keeps the profile default.
    pub weekly_days: Option<Decimal>,
    /// Change to monthly fixed expenses; consumed by take-home callers,
    /// never by the revenue series.
    pub expense_delta: Decimal,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            vacation_weeks: Decimal::ZERO,
            rate_change_pct: Decimal::ZERO,
            rate_change_after_pct: Decimal::ZERO,
            lost_client: None,
            new_clients: 0,
            weekly_days: None,
            expense_delta: Decimal::ZERO,
        }
    }
}
