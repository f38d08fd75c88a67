//! Logistics manager
//!
//! Incoming orders: what was ordered, how many at what unit price, from which
//! retailer, and when it is due to arrive.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{Date, Row, Schema, Table};
use crate::sort::try_sort;
use crate::validation::{validate_day, validate_int, validate_month, validate_string, validate_year_from};

pub const TITLE: usize = 1;
pub const AMOUNT: usize = 2;
pub const PRICE: usize = 3;
pub const RETAILER: usize = 4;
pub const YEAR: usize = 5;
pub const MONTH: usize = 6;
pub const DAY: usize = 7;

pub const HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Amount",
    "Price per item",
    "Retailer",
    "Year",
    "Month",
    "Day",
];

pub fn schema(settings: &Settings) -> Schema {
    let current_year = settings.current_year;
    Schema::new()
        .free(HEADERS[TITLE], "Title: ")
        .field(HEADERS[AMOUNT], "Amount: ", validate_int)
        .field(HEADERS[PRICE], "Price per Item: ", validate_int)
        .field(HEADERS[RETAILER], "Retailer: ", validate_string)
        .field(HEADERS[YEAR], "Year of arrival: ", move |s: &str| {
            validate_year_from(s, current_year)
        })
        .field(HEADERS[MONTH], "Month of arrival: ", validate_month)
        .field(HEADERS[DAY], "Day of arrival: ", validate_day)
}

pub fn arrival_date(row: &Row) -> ErpResult<Date> {
    row.date(YEAR, MONTH, DAY)
}

/// Amount owed for one order
pub fn amount_due(row: &Row) -> ErpResult<i64> {
    row.int(AMOUNT)?
        .checked_mul(row.int(PRICE)?)
        .ok_or_else(|| ErpError::overflow(format!("amount due of '{}'", row.id())))
}

/// Sum of `amount * unit price` over each retailer's orders
pub fn total_due_per_retailer(table: &Table) -> ErpResult<BTreeMap<String, i64>> {
    let mut totals = BTreeMap::new();
    for row in table {
        let due = amount_due(row)?;
        let retailer = row.text(RETAILER)?;
        let total = totals.entry(retailer.to_string()).or_insert(0i64);
        *total = total
            .checked_add(due)
            .ok_or_else(|| ErpError::overflow(format!("amount due to '{}'", retailer)))?;
    }
    Ok(totals)
}

/// Orders from the earliest arrival date to the latest
pub fn orders_by_arrival(table: &Table) -> ErpResult<Vec<Row>> {
    try_sort(table.rows(), arrival_date, false)
}
