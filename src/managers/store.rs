//! Store manager
//!
//! Games on offer, with their manufacturer, price and the number of copies
//! in stock.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{Schema, Table};
use crate::validation::{validate_int, validate_string};

pub const TITLE: usize = 1;
pub const MANUFACTURER: usize = 2;
pub const PRICE: usize = 3;
pub const IN_STOCK: usize = 4;

pub const HEADERS: [&str; 5] = ["ID", "Title", "Manufacturer", "Price", "In stock"];

pub fn schema(_settings: &Settings) -> Schema {
    Schema::new()
        .field(HEADERS[TITLE], "Title: ", validate_string)
        .field(HEADERS[MANUFACTURER], "Manufacturer: ", validate_string)
        .field(HEADERS[PRICE], "Price: ", validate_int)
        .field(HEADERS[IN_STOCK], "In Stock: ", validate_int)
}

/// Number of games of each manufacturer
pub fn counts_by_manufacturer(table: &Table) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in table {
        if let Some(manufacturer) = row.cell(MANUFACTURER) {
            *counts.entry(manufacturer.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Average stock of a manufacturer's games
///
/// `None` for an empty manufacturer name, `0.0` when the manufacturer has no
/// games in the table.
pub fn average_stock_by_manufacturer(table: &Table, manufacturer: &str) -> ErpResult<Option<f64>> {
    if manufacturer.is_empty() {
        return Ok(None);
    }

    let mut total = 0i64;
    let mut count = 0usize;
    for row in table {
        if row.cell(MANUFACTURER) == Some(manufacturer) {
            total = total
                .checked_add(row.int(IN_STOCK)?)
                .ok_or_else(|| ErpError::overflow(format!("stock of {}", manufacturer)))?;
            count += 1;
        }
    }

    if count == 0 {
        return Ok(Some(0.0));
    }
    Ok(Some(total as f64 / count as f64))
}
