//! Rows and tables
//!
//! A table is an ordered list of rows loaded wholesale from a flat file. Each
//! row is a list of string cells whose first cell is the record identifier.
//! Typed access to cells is derived on demand and reports malformed data as
//! [`ErpError::Data`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::date::Date;
use crate::error::{ErpError, ErpResult};

/// Column index of the record identifier in every table
pub const ID: usize = 0;

/// One record: cell 0 is the identifier, the rest follow the table schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Create a row from anything string-like
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(cells.into_iter().map(Into::into).collect())
    }

    /// The record identifier (empty for an empty row)
    pub fn id(&self) -> &str {
        self.cell(ID).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a cell, if the row has that many columns
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Get a cell, treating a short row as malformed data
    pub fn text(&self, column: usize) -> ErpResult<&str> {
        self.cell(column).ok_or_else(|| {
            ErpError::Data(format!("record '{}' has no column {}", self.id(), column))
        })
    }

    /// Interpret a cell as an integer
    pub fn int(&self, column: usize) -> ErpResult<i64> {
        let raw = self.text(column)?;
        raw.trim().parse().map_err(|_| {
            ErpError::Data(format!(
                "record '{}' column {}: '{}' is not an integer",
                self.id(),
                column,
                raw
            ))
        })
    }

    /// Build the date stored across three cells
    pub fn date(&self, year: usize, month: usize, day: usize) -> ErpResult<Date> {
        Date::from_parts(self.text(year)?, self.text(month)?, self.text(day)?).map_err(|e| {
            ErpError::Data(format!("record '{}': {}", self.id(), e))
        })
    }

    /// Replace a non-ID cell, growing the row if needed
    pub(crate) fn set(&mut self, column: usize, value: String) {
        debug_assert_ne!(column, ID, "the identifier cell is immutable");
        if self.0.len() <= column {
            self.0.resize(column + 1, String::new());
        }
        self.0[column] = value;
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

/// An in-memory table of rows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Append a row; callers are responsible for identifier uniqueness
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Splice out the row at `index`
    pub(crate) fn remove_at(&mut self, index: usize) -> Row {
        self.rows.remove(index)
    }

    /// Index of the first row whose identifier is `id`
    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        self.find_index_by_value(ID, id)
    }

    /// Index of the first row whose `column` equals `value`
    pub fn find_index_by_value(&self, column: usize, value: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.cell(column) == Some(value))
    }

    /// Get the row with the given identifier
    pub fn get_by_id(&self, id: &str) -> Option<&Row> {
        self.find_index_by_id(id).and_then(|index| self.rows.get(index))
    }

    /// Check if an identifier is already used in the table
    pub fn id_exists(&self, id: &str) -> bool {
        self.find_index_by_id(id).is_some()
    }

    /// Distinct values of a column in ascending order
    pub fn distinct(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.cell(column))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Rows whose derived date lies strictly between `low` and `high`
///
/// Both boundary dates are excluded.
pub fn rows_between<F>(table: &Table, date_of: F, low: &Date, high: &Date) -> ErpResult<Vec<Row>>
where
    F: Fn(&Row) -> ErpResult<Date>,
{
    let mut found = Vec::new();
    for row in table {
        if date_of(row)?.is_strictly_between(low, high) {
            found.push(row.clone());
        }
    }
    Ok(found)
}

/// Sum an integer column over the rows accepted by `filter`
pub fn sum_where<'a, I, F>(rows: I, column: usize, filter: F) -> ErpResult<i64>
where
    I: IntoIterator<Item = &'a Row>,
    F: Fn(&Row) -> bool,
{
    let mut total = 0i64;
    for row in rows.into_iter().filter(|row| filter(row)) {
        total = i64::checked_add(total, row.int(column)?)
            .ok_or_else(|| ErpError::overflow(format!("sum of column {}", column)))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Table {
        [
            ["eH34Ju#&", "Astebreed", "25", "3", "10", "2016"],
            ["bH34Ju#&", "Age of Wonders II", "20", "4", "1", "2016"],
            ["vH34Ju#&", "AudioSurf", "23", "6", "2", "2016"],
            ["kH35Ju#&", "Age of Empires", "11", "3", "7", "2016"],
            ["kH38Jm#&", "Amnesia", "30", "2", "12", "2016"],
            ["kH14Ju#&", "Arma II", "15", "7", "6", "2016"],
            ["eH34Jd#&", "Alan Wake", "40", "1", "3", "2015"],
        ]
        .into_iter()
        .map(Row::from_cells)
        .collect()
    }

    fn sale_date(row: &Row) -> ErpResult<Date> {
        row.date(5, 3, 4)
    }

    #[test]
    fn test_find_index_by_id() {
        let table = sales();
        assert_eq!(table.find_index_by_id("vH34Ju#&"), Some(2));
        assert_eq!(table.find_index_by_id("missing!"), None);
        assert!(table.id_exists("eH34Ju#&"));
    }

    #[test]
    fn test_find_index_by_value() {
        let table = sales();
        assert_eq!(table.find_index_by_value(5, "2015"), Some(6));
        assert_eq!(table.find_index_by_value(5, "2014"), None);
        assert_eq!(table.find_index_by_value(42, "2016"), None);
    }

    #[test]
    fn test_typed_cells() {
        let table = sales();
        let row = table.get(0).unwrap();
        assert_eq!(row.id(), "eH34Ju#&");
        assert_eq!(row.int(2).unwrap(), 25);
        assert_eq!(sale_date(row).unwrap(), Date::new(2016, 3, 10).unwrap());
        assert!(matches!(row.int(1), Err(ErpError::Data(_))));
        assert!(matches!(row.text(9), Err(ErpError::Data(_))));
    }

    #[test]
    fn test_rows_between_concrete_scenario() {
        let table = sales();
        let low = Date::new(2016, 2, 12).unwrap();
        let high = Date::new(2016, 7, 6).unwrap();

        let found = rows_between(&table, sale_date, &low, &high).unwrap();
        let mut ids: Vec<&str> = found.iter().map(Row::id).collect();
        ids.sort_unstable();

        assert_eq!(ids, vec!["bH34Ju#&", "eH34Ju#&", "kH35Ju#&", "vH34Ju#&"]);
    }

    #[test]
    fn test_rows_between_excludes_boundaries() {
        let table: Table = [
            ["a", "x", "1", "1", "1", "2016"],
            ["b", "x", "1", "1", "2", "2016"],
            ["c", "x", "1", "1", "3", "2016"],
        ]
        .into_iter()
        .map(Row::from_cells)
        .collect();

        let d1 = Date::new(2016, 1, 1).unwrap();
        let d3 = Date::new(2016, 1, 3).unwrap();
        let found = rows_between(&table, sale_date, &d1, &d3).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "b");
    }

    #[test]
    fn test_rows_between_propagates_malformed_dates() {
        let table: Table = [["a", "x", "1", "13", "1", "2016"]]
            .into_iter()
            .map(Row::from_cells)
            .collect();
        let low = Date::new(2000, 1, 1).unwrap();
        let high = Date::new(2030, 1, 1).unwrap();
        assert!(rows_between(&table, sale_date, &low, &high).is_err());
    }

    #[test]
    fn test_sum_where() {
        let table = sales();
        let total_2016 = sum_where(&table, 2, |row| row.cell(5) == Some("2016")).unwrap();
        assert_eq!(total_2016, 25 + 20 + 23 + 11 + 30 + 15);
    }

    #[test]
    fn test_sum_where_overflow_is_data_error() {
        let table: Table = [["a", "9223372036854775807"], ["b", "9223372036854775807"]]
            .into_iter()
            .map(Row::from_cells)
            .collect();
        assert!(matches!(sum_where(&table, 1, |_| true), Err(ErpError::Data(_))));
        assert_eq!(sum_where(&table, 1, |row| row.id() == "a").unwrap(), i64::MAX);
    }

    #[test]
    fn test_distinct() {
        let table = sales();
        assert_eq!(table.distinct(5), vec!["2015".to_string(), "2016".to_string()]);
    }

    #[test]
    fn test_set_grows_short_rows() {
        let mut row = Row::from_cells(["id"]);
        row.set(2, "x".into());
        assert_eq!(row.cells(), &["id".to_string(), String::new(), "x".to_string()]);
    }
}
