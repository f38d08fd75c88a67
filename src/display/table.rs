//! Table display formatting
//!
//! Renders rows as a bordered grid with centered cells.

use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Alignment, Style};

use crate::models::Row;

/// Render arbitrary records under the given headers
///
/// Rows shorter than the header list are padded with empty cells.
pub fn format_grid<H, R, C>(headers: &[H], records: R) -> String
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<C>>,
    C: ToString,
{
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.as_ref().to_string()));

    let mut count = 0;
    for record in records {
        let mut cells: Vec<String> = record.iter().map(ToString::to_string).collect();
        if cells.len() < headers.len() {
            cells.resize(headers.len(), String::new());
        }
        builder.push_record(cells);
        count += 1;
    }

    if count == 0 {
        return "No records found.".to_string();
    }

    let mut table = builder.build();
    table
        .with(Style::ascii())
        .modify(Segment::all(), Alignment::center());
    table.to_string()
}

/// Render table rows under their headers
pub fn format_rows<'a, H, I>(headers: &[H], rows: I) -> String
where
    H: AsRef<str>,
    I: IntoIterator<Item = &'a Row>,
{
    format_grid(headers, rows.into_iter().map(|row| row.cells().to_vec()))
}

/// Render a single row as `Header: value` lines
pub fn format_row_details<H: AsRef<str>>(headers: &[H], row: &Row) -> String {
    let width = headers.iter().map(|h| h.as_ref().len()).max().unwrap_or(0);
    let mut output = String::new();
    for (column, value) in row.cells().iter().enumerate() {
        let label = headers
            .get(column)
            .map(|h| h.as_ref().to_string())
            .unwrap_or_else(|| format!("Column {}", column));
        output.push_str(&format!("{:<width$}  {}\n", label, value, width = width));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(format_rows(&["ID", "Name"], &rows), "No records found.");
    }

    #[test]
    fn test_rows_rendered_with_headers() {
        let rows = vec![
            Row::from_cells(["kH14Ju#&", "Joe Doe", "1980"]),
            Row::from_cells(["jH34Ju#&", "Ann"]),
        ];
        let output = format_rows(&["ID", "Name", "Birth year"], &rows);

        assert!(output.contains("Birth year"));
        assert!(output.contains("Joe Doe"));
        assert!(output.contains("jH34Ju#&"));
        assert!(output.lines().all(|line| line.starts_with('+') || line.starts_with('|')));
    }

    #[test]
    fn test_row_details() {
        let row = Row::from_cells(["kH14Ju#&", "Joe Doe", "1980", "extra"]);
        let details = format_row_details(&["ID", "Name", "Birth year"], &row);

        assert!(details.contains("Name        Joe Doe"));
        assert!(details.contains("Column 3"));
    }
}
