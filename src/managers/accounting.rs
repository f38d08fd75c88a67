//! Accounting manager
//!
//! One row per money movement: the date it happened, whether it was income
//! (`in`) or an expense (`out`), and the amount in whole dollars.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{Schema, Table};
use crate::validation::{validate_day, validate_int, validate_month, validate_type, validate_year_by};

pub const MONTH: usize = 1;
pub const DAY: usize = 2;
pub const YEAR: usize = 3;
pub const TYPE: usize = 4;
pub const AMOUNT: usize = 5;

pub const HEADERS: [&str; 6] = ["ID", "Month", "Day", "Year", "Type", "Amount"];

pub fn schema(settings: &Settings) -> Schema {
    let current_year = settings.current_year;
    Schema::new()
        .field(HEADERS[MONTH], "Please enter the month: ", validate_month)
        .field(HEADERS[DAY], "Please enter the day: ", validate_day)
        .field(HEADERS[YEAR], "Please enter the year: ", move |s: &str| {
            validate_year_by(s, current_year)
        })
        .field(HEADERS[TYPE], "Please enter the type (in or out): ", validate_type)
        .field(
            HEADERS[AMOUNT],
            "Please enter the amount (in US dollars): ",
            validate_int,
        )
}

/// Signed amount of a row: income counts positive, expenses negative
fn signed_amount(kind: &str, amount: i64) -> Option<i64> {
    match kind {
        "in" => Some(amount),
        "out" => amount.checked_neg(),
        _ => Some(0),
    }
}

/// Profit and item count per year, in ascending year order
fn profit_by_year(table: &Table) -> ErpResult<BTreeMap<i64, (i64, usize)>> {
    let mut years: BTreeMap<i64, (i64, usize)> = BTreeMap::new();
    for row in table {
        let year = row.int(YEAR)?;
        let entry = years.entry(year).or_default();
        entry.0 = signed_amount(row.text(TYPE)?, row.int(AMOUNT)?)
            .and_then(|amount| entry.0.checked_add(amount))
            .ok_or_else(|| ErpError::overflow(format!("profit of {}", year)))?;
        entry.1 += 1;
    }
    Ok(years)
}

/// The year whose income minus expenses is the highest
///
/// Ties resolve to the earliest year. `None` for an empty table.
pub fn year_with_highest_profit(table: &Table) -> ErpResult<Option<i64>> {
    let mut best: Option<(i64, i64)> = None;
    for (year, (profit, _)) in profit_by_year(table)? {
        if best.map_or(true, |(_, top)| profit > top) {
            best = Some((year, profit));
        }
    }
    Ok(best.map(|(year, _)| year))
}

/// Profit of a year divided by the number of rows recorded in that year
pub fn average_profit_per_item(table: &Table, year: i64) -> ErpResult<f64> {
    let years = profit_by_year(table)?;
    let (profit, count) = years
        .get(&year)
        .ok_or_else(|| ErpError::value_not_found(year.to_string()))?;
    Ok(*profit as f64 / *count as f64)
}
