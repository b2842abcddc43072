pub mod portfolio;
pub mod report;

pub use portfolio::{ClientRecord, PortfolioError, PortfolioLoader};
