//! Customer relationship management
//!
//! Customers with their e-mail address and newsletter subscription flag.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::config::Settings;
use crate::models::{Row, Schema, Table, ID};
use crate::sort::sort;
use crate::validation::{validate_boolean, validate_email, validate_string};

pub const NAME: usize = 1;
pub const EMAIL: usize = 2;
pub const SUBSCRIBED: usize = 3;

pub const HEADERS: [&str; 4] = ["ID", "Name", "E-mail", "Subscribed"];

pub fn schema(_settings: &Settings) -> Schema {
    Schema::new()
        .field(HEADERS[NAME], "Name: ", validate_string)
        .field(HEADERS[EMAIL], "E-mail: ", validate_email)
        .field(
            HEADERS[SUBSCRIBED],
            "Subscribed? (1 for yes, 0 for no): ",
            validate_boolean,
        )
}

/// ID of the customer with the longest name
///
/// Among names of equal length the alphabetically first wins.
pub fn longest_name_id(table: &Table) -> Option<String> {
    let ranked = sort(
        table.rows(),
        |row: &Row| {
            let name = row.cell(NAME).unwrap_or_default().to_string();
            (Reverse(name.chars().count()), name)
        },
        false,
    );
    ranked.first().map(|row| row.id().to_string())
}

/// `(email, name)` of every subscribed customer, in table order
pub fn subscribed_emails(table: &Table) -> Vec<(String, String)> {
    table
        .iter()
        .filter(|row| row.cell(SUBSCRIBED) == Some("1"))
        .map(|row| {
            (
                row.cell(EMAIL).unwrap_or_default().to_string(),
                row.cell(NAME).unwrap_or_default().to_string(),
            )
        })
        .collect()
}

pub fn name_by_id(table: &Table, id: &str) -> Option<String> {
    table
        .get_by_id(id)
        .and_then(|row| row.cell(NAME))
        .map(str::to_string)
}

pub fn email_by_id(table: &Table, id: &str) -> Option<String> {
    table
        .get_by_id(id)
        .and_then(|row| row.cell(EMAIL))
        .map(str::to_string)
}

/// Every customer ID in the table
pub fn customer_ids(table: &Table) -> BTreeSet<String> {
    table.distinct(ID).into_iter().collect()
}
