pub mod calculations;
pub mod models;

pub use calculations::{
    EffectiveRates, NetIncomeBreakdown, RevenueModel, ReverseSolver, SEASONALITY,
    ScenarioSimulator, SolverError, TaxEngine, adjusted_monthly_expenses,
};
pub use models::*;
