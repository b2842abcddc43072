//! Business-day calendar arithmetic.
//!
//! Counts weekdays (Monday through Friday) by direct calendar enumeration;
//! no 21.67-days-per-month style approximation is used anywhere.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::MONTHS_PER_YEAR;

/// Number of weekdays (Monday-Friday) in each month of `year`.
///
/// # Examples
///
/// ```
/// use forecast_core::calculations::calendar::business_days_per_month;
///
/// let days = business_days_per_month(2025);
/// assert_eq!(days[0], 23); // January 2025
/// assert_eq!(days[1], 20); // February 2025
/// ```
pub fn business_days_per_month(year: i32) -> [u32; MONTHS_PER_YEAR] {
    let mut counts = [0u32; MONTHS_PER_YEAR];
    for (month0, slot) in counts.iter_mut().enumerate() {
        let month = month0 as u32 + 1;
        *slot = (1..=31)
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32;
    }
    counts
}

/// Arithmetic mean of the monthly business-day counts for `year`.
pub fn average_business_days(year: i32) -> Decimal {
    let total: u32 = business_days_per_month(year).iter().sum();
    Decimal::from(total) / Decimal::from(MONTHS_PER_YEAR as u32)
}
