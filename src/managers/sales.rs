//! Sales manager
//!
//! Every sale records the game title, the price it sold for, the sale date
//! and the ID of the buying customer in the CRM table.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{rows_between, sum_where, Date, Row, Schema, Table, ID};
use crate::sort::try_sort;
use crate::validation::{
    validate_day, validate_id_possible, validate_int, validate_month, validate_string,
    validate_year_by,
};

pub const TITLE: usize = 1;
pub const PRICE: usize = 2;
pub const MONTH: usize = 3;
pub const DAY: usize = 4;
pub const YEAR: usize = 5;
pub const CUSTOMER_ID: usize = 6;

pub const HEADERS: [&str; 7] = ["ID", "Title", "Price", "Month", "Day", "Year", "Customer ID"];

pub fn schema(settings: &Settings) -> Schema {
    let current_year = settings.current_year;
    Schema::new()
        .field(HEADERS[TITLE], "Title: ", validate_string)
        .field(HEADERS[PRICE], "Price: ", validate_int)
        .field(HEADERS[MONTH], "Month of sale: ", validate_month)
        .field(HEADERS[DAY], "Day of sale: ", validate_day)
        .field(HEADERS[YEAR], "Year of sale: ", move |s: &str| {
            validate_year_by(s, current_year)
        })
        .field(HEADERS[CUSTOMER_ID], "Customer ID: ", validate_id_possible)
}

pub fn sale_date(row: &Row) -> ErpResult<Date> {
    row.date(YEAR, MONTH, DAY)
}

/// ID of the cheapest sale
///
/// Among equal prices, the sale whose title comes first in descending
/// alphabetical order wins.
pub fn lowest_price_item_id(table: &Table) -> ErpResult<Option<String>> {
    let ranked = try_sort(
        table.rows(),
        |row: &Row| -> ErpResult<(i64, Reverse<String>)> {
            Ok((row.int(PRICE)?, Reverse(row.text(TITLE)?.to_string())))
        },
        false,
    )?;
    Ok(ranked.first().map(|row| row.id().to_string()))
}

/// Sales made strictly after `from` and strictly before `to`
pub fn items_sold_between(table: &Table, from: &Date, to: &Date) -> ErpResult<Vec<Row>> {
    rows_between(table, sale_date, from, to)
}

/// The sale with the latest date; the first such row on ties
pub fn last_sold(table: &Table) -> ErpResult<Option<&Row>> {
    let mut latest: Option<(Date, &Row)> = None;
    for row in table {
        let date = sale_date(row)?;
        if latest.as_ref().map_or(true, |(best, _)| date > *best) {
            latest = Some((date, row));
        }
    }
    Ok(latest.map(|(_, row)| row))
}

pub fn item_id_sold_last(table: &Table) -> ErpResult<Option<String>> {
    Ok(last_sold(table)?.map(|row| row.id().to_string()))
}

pub fn item_title_sold_last(table: &Table) -> ErpResult<Option<String>> {
    Ok(last_sold(table)?
        .and_then(|row| row.cell(TITLE))
        .map(str::to_string))
}

/// Total price of the listed sales; unknown IDs contribute nothing
pub fn sum_of_prices<S: AsRef<str>>(table: &Table, item_ids: &[S]) -> ErpResult<i64> {
    sum_where(table, PRICE, |row| {
        item_ids.iter().any(|id| id.as_ref() == row.id())
    })
}

pub fn customer_id_by_sale_id(table: &Table, sale_id: &str) -> Option<String> {
    table
        .get_by_id(sale_id)
        .and_then(|row| row.cell(CUSTOMER_ID))
        .map(str::to_string)
}

/// Every customer ID that appears on at least one sale
pub fn customer_ids(table: &Table) -> BTreeSet<String> {
    table.distinct(CUSTOMER_ID).into_iter().collect()
}

/// Sale IDs of each customer, in table order
pub fn sales_ids_per_customer(table: &Table) -> BTreeMap<String, Vec<String>> {
    let mut per_customer: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in table {
        if let Some(customer) = row.cell(CUSTOMER_ID) {
            per_customer
                .entry(customer.to_string())
                .or_default()
                .push(row.cell(ID).unwrap_or_default().to_string());
        }
    }
    per_customer
}

/// Number of sales of each customer
pub fn sales_count_per_customer(table: &Table) -> BTreeMap<String, usize> {
    sales_ids_per_customer(table)
        .into_iter()
        .map(|(customer, sales)| (customer, sales.len()))
        .collect()
}

/// Total spent by each customer
pub fn spending_per_customer(table: &Table) -> ErpResult<BTreeMap<String, i64>> {
    let mut spending = BTreeMap::new();
    for row in table {
        let price = row.int(PRICE)?;
        let customer = row.text(CUSTOMER_ID)?;
        let total = spending.entry(customer.to_string()).or_insert(0i64);
        *total = total
            .checked_add(price)
            .ok_or_else(|| ErpError::overflow(format!("spending of '{}'", customer)))?;
    }
    Ok(spending)
}
