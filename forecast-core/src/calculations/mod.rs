//! Calculation modules for the forecasting engine.
//!
//! Everything here is a pure, synchronous function of its explicit inputs:
//! no I/O, no shared mutable state. Cheap enough (O(clients x 12)) to
//! recompute on every user interaction; callers that still want caching
//! should memoize on input identity.

pub mod calendar;
pub mod common;
pub mod revenue;
pub mod scenario;
pub mod solver;
pub mod tax;

pub use revenue::{RevenueModel, SEASONALITY};
pub use scenario::{ScenarioSimulator, adjusted_monthly_expenses};
pub use solver::{ReverseSolver, SolverError};
pub use tax::{EffectiveRates, NetIncomeBreakdown, TaxEngine};
