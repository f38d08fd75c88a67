//! Human resources manager

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::models::{Schema, Table};
use crate::validation::validate_year_by;

pub const NAME: usize = 1;
pub const BIRTH_YEAR: usize = 2;

pub const HEADERS: [&str; 3] = ["ID", "Name", "Birth year"];

pub fn schema(settings: &Settings) -> Schema {
    let current_year = settings.current_year;
    Schema::new()
        .free(HEADERS[NAME], "Name: ")
        .field(HEADERS[BIRTH_YEAR], "Birth year: ", move |s: &str| {
            validate_year_by(s, current_year)
        })
}

fn names_where<F>(table: &Table, keep: F) -> ErpResult<Vec<String>>
where
    F: Fn(i64) -> bool,
{
    let mut names = Vec::new();
    for row in table {
        if keep(row.int(BIRTH_YEAR)?) {
            names.push(row.text(NAME)?.to_string());
        }
    }
    Ok(names)
}

/// Names of everyone sharing the earliest birth year, in table order
pub fn oldest_persons(table: &Table) -> ErpResult<Vec<String>> {
    let mut earliest: Option<i64> = None;
    for row in table {
        let year = row.int(BIRTH_YEAR)?;
        earliest = Some(earliest.map_or(year, |e| e.min(year)));
    }

    match earliest {
        Some(earliest) => names_where(table, |year| year == earliest),
        None => Ok(Vec::new()),
    }
}

/// Names of everyone whose birth year is nearest to the average birth year
pub fn persons_closest_to_average(table: &Table) -> ErpResult<Vec<String>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let mut total = 0i64;
    for row in table {
        total = total
            .checked_add(row.int(BIRTH_YEAR)?)
            .ok_or_else(|| ErpError::overflow("sum of birth years"))?;
    }
    let average = total as f64 / table.len() as f64;

    let mut closest = f64::INFINITY;
    for row in table {
        closest = closest.min((row.int(BIRTH_YEAR)? as f64 - average).abs());
    }

    names_where(table, |year| (year as f64 - average).abs() == closest)
}
