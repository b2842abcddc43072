//! CSV portfolio loading.
//!
//! The portfolio file carries one row per client with a `mode` column
//! selecting the billing arrangement; columns that do not apply to a mode
//! are left empty. Example:
//!
//! ```csv
//! id,name,mode,active,color,daily_rate,weekly_days,annual_days,monthly_amount,total_amount,start_month,end_month
//! 1,Acme,daily_rate,true,#2563eb,500,5,,,,,
//! 2,Studio,retainer,true,#16a34a,,,,3000,,,
//! 3,Rebrand,fixed_price,true,#f59e0b,,,,,24000,2,7
//! ```

use std::io::Read;

use forecast_core::{Billing, Client, ClientId, MonthWindow, WorkSchedule};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a client portfolio.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("client {id}: unknown billing mode '{mode}'")]
    UnknownMode { id: i64, mode: String },

    #[error("client {id}: missing column '{field}' for mode '{mode}'")]
    MissingField {
        id: i64,
        mode: &'static str,
        field: &'static str,
    },

    #[error("client {id}: month index {value} is out of range 0-11")]
    MonthOutOfRange { id: i64, value: usize },
}

impl From<csv::Error> for PortfolioError {
    fn from(err: csv::Error) -> Self {
        PortfolioError::CsvParse(err.to_string())
    }
}

/// Color assigned when the portfolio file leaves the column empty.
const DEFAULT_COLOR: &str = "#64748b";

/// A single row of the portfolio CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientRecord {
    pub id: i64,
    pub name: String,
    pub mode: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub daily_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub weekly_days: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub annual_days: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub monthly_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_usize")]
    pub start_month: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_optional_usize")]
    pub end_month: Option<usize>,
}

fn default_active() -> bool {
    true
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for client portfolios from CSV data.
pub struct PortfolioLoader;

impl PortfolioLoader {
    /// Parse raw records from any CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ClientRecord>, PortfolioError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ClientRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and convert a CSV reader into engine client records.
    pub fn load<R: Read>(reader: R) -> Result<Vec<Client>, PortfolioError> {
        Self::parse(reader)?
            .into_iter()
            .map(Self::to_client)
            .collect()
    }

    fn to_client(record: ClientRecord) -> Result<Client, PortfolioError> {
        let id = record.id;
        let billing = match record.mode.as_str() {
            "daily_rate" => {
                let daily_rate = require(record.daily_rate, id, "daily_rate", "daily_rate")?;
                // A weekly day count takes precedence when both are given.
                let schedule = match (record.weekly_days, record.annual_days) {
                    (Some(days), _) => WorkSchedule::WeeklyDays(days),
                    (None, Some(days)) => WorkSchedule::AnnualDays(days),
                    (None, None) => {
                        return Err(PortfolioError::MissingField {
                            id,
                            mode: "daily_rate",
                            field: "weekly_days or annual_days",
                        });
                    }
                };
                let window = match (record.start_month, record.end_month) {
                    (Some(start), Some(end)) => Some(month_window(id, start, end)?),
                    (None, None) => None,
                    (Some(_), None) => {
                        return Err(PortfolioError::MissingField {
                            id,
                            mode: "daily_rate",
                            field: "end_month",
                        });
                    }
                    (None, Some(_)) => {
                        return Err(PortfolioError::MissingField {
                            id,
                            mode: "daily_rate",
                            field: "start_month",
                        });
                    }
                };
                Billing::DailyRate {
                    daily_rate,
                    schedule,
                    window,
                }
            }
            "retainer" => Billing::Retainer {
                monthly_amount: require(record.monthly_amount, id, "retainer", "monthly_amount")?,
            },
            "fixed_price" => Billing::FixedPrice {
                total_amount: require(record.total_amount, id, "fixed_price", "total_amount")?,
                window: month_window(
                    id,
                    require_month(record.start_month, id, "fixed_price", "start_month")?,
                    require_month(record.end_month, id, "fixed_price", "end_month")?,
                )?,
            },
            other => {
                return Err(PortfolioError::UnknownMode {
                    id,
                    mode: other.to_string(),
                });
            }
        };

        Ok(Client {
            id: ClientId(id),
            name: record.name,
            billing,
            active: record.active,
            color: if record.color.trim().is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                record.color
            },
        })
    }
}

fn require(
    value: Option<Decimal>,
    id: i64,
    mode: &'static str,
    field: &'static str,
) -> Result<Decimal, PortfolioError> {
    value.ok_or(PortfolioError::MissingField { id, mode, field })
}

fn require_month(
    value: Option<usize>,
    id: i64,
    mode: &'static str,
    field: &'static str,
) -> Result<usize, PortfolioError> {
    value.ok_or(PortfolioError::MissingField { id, mode, field })
}

fn month_window(id: i64, start: usize, end: usize) -> Result<MonthWindow, PortfolioError> {
    for value in [start, end] {
        if value > 11 {
            return Err(PortfolioError::MonthOutOfRange { id, value });
        }
    }
    Ok(MonthWindow { start, end })
}
