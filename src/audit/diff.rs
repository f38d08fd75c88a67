//! Diff generation for audit logging
//!
//! Describes which cells of a record changed, using the table's column
//! headers.

use crate::models::Row;

/// Generate a human-readable diff between two versions of a record
///
/// Returns `None` when no cell changed. Cells beyond the header list are
/// labelled by their column number.
pub fn generate_row_diff(headers: &[String], before: &Row, after: &Row) -> Option<String> {
    let width = before.len().max(after.len());
    let changes: Vec<String> = (0..width)
        .filter_map(|column| {
            let old = before.cell(column);
            let new = after.cell(column);
            if old == new {
                return None;
            }
            let label = headers
                .get(column)
                .cloned()
                .unwrap_or_else(|| format!("column {}", column));
            Some(format!(
                "{}: {} -> {}",
                label,
                format_cell(old),
                format_cell(new)
            ))
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_cell(cell: Option<&str>) -> String {
    match cell {
        None => "(none)".to_string(),
        Some(s) if s.chars().count() > 50 => {
            let truncated: String = s.chars().take(47).collect();
            format!("\"{}...\"", truncated)
        }
        Some(s) => format!("\"{}\"", s),
    }
}
