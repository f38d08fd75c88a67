//! Inventory manager
//!
//! Equipment owned by the company, with the year it was bought and how many
//! years it is expected to last.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{Row, Schema, Table};
use crate::validation::{validate_int, validate_string, validate_year_by};

pub const NAME: usize = 1;
pub const MANUFACTURER: usize = 2;
pub const PURCHASE_YEAR: usize = 3;
pub const DURABILITY: usize = 4;

pub const HEADERS: [&str; 5] = ["ID", "Name", "Manufacturer", "Purchase year", "Durability"];

pub fn schema(settings: &Settings) -> Schema {
    let current_year = settings.current_year;
    Schema::new()
        .field(HEADERS[NAME], "Name: ", validate_string)
        .field(HEADERS[MANUFACTURER], "Manufacturer: ", validate_string)
        .field(HEADERS[PURCHASE_YEAR], "Purchase year: ", move |s: &str| {
            validate_year_by(s, current_year)
        })
        .field(HEADERS[DURABILITY], "Durability: ", validate_int)
}

/// Items whose durability has not run out by `current_year`
pub fn available_items(table: &Table, current_year: i32) -> ErpResult<Vec<Row>> {
    let mut available = Vec::new();
    for row in table {
        let age = i64::from(current_year)
            .checked_sub(row.int(PURCHASE_YEAR)?)
            .ok_or_else(|| ErpError::overflow(format!("age of '{}'", row.id())))?;
        if age < row.int(DURABILITY)? {
            available.push(row.clone());
        }
    }
    Ok(available)
}

/// Mean durability of each manufacturer's items
pub fn average_durability_by_manufacturer(table: &Table) -> ErpResult<BTreeMap<String, f64>> {
    let mut totals: BTreeMap<String, (i64, usize)> = BTreeMap::new();
    for row in table {
        let durability = row.int(DURABILITY)?;
        let manufacturer = row.text(MANUFACTURER)?;
        let entry = totals.entry(manufacturer.to_string()).or_default();
        entry.0 = entry.0.checked_add(durability).ok_or_else(|| {
            ErpError::overflow(format!("durability of {}", manufacturer))
        })?;
        entry.1 += 1;
    }

    Ok(totals
        .into_iter()
        .map(|(manufacturer, (total, count))| (manufacturer, total as f64 / count as f64))
        .collect())
}
