//! Partner registry
//!
//! Companies we deal with and the person to contact at each.

use crate::config::Settings;
use crate::models::{Row, Schema, Table};
use crate::validation::{validate_email, validate_string};

pub const NAME: usize = 1;
pub const CONTACT: usize = 2;
pub const EMAIL: usize = 3;
pub const PHONE: usize = 4;
pub const ADDRESS: usize = 5;

pub const HEADERS: [&str; 6] = ["ID", "Name", "Contact person", "E-mail", "Phone", "Address"];

pub fn schema(_settings: &Settings) -> Schema {
    Schema::new()
        .field(HEADERS[NAME], "Name: ", validate_string)
        .field(HEADERS[CONTACT], "Contact Person: ", validate_string)
        .field(HEADERS[EMAIL], "E-mail: ", validate_email)
        .field(HEADERS[PHONE], "Phone number: ", validate_string)
        .field(HEADERS[ADDRESS], "Address: ", validate_string)
}

/// One field of the partner with the given ID
pub fn info_by_id(table: &Table, id: &str, column: usize) -> Option<String> {
    table
        .get_by_id(id)
        .and_then(|row| row.cell(column))
        .map(str::to_string)
}

/// The first partner registered under `name`
pub fn find_by_name<'a>(table: &'a Table, name: &str) -> Option<&'a Row> {
    table
        .find_index_by_value(NAME, name)
        .and_then(|index| table.get(index))
}
