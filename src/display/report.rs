//! Report formatting utilities for terminal output

use std::collections::BTreeMap;
use std::fmt::Display;

use super::table::format_grid;

/// Format an average with two decimals
pub fn format_average(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a single labelled result, or a placeholder when there is none
pub fn format_result<T: Display>(label: &str, value: Option<T>) -> String {
    match value {
        Some(value) => format!("{}: {}", label, value),
        None => format!("{}: (none)", label),
    }
}

/// Format a list of plain values, comma separated
pub fn format_list<T: Display>(label: &str, values: &[T]) -> String {
    if values.is_empty() {
        return format!("{}: (none)", label);
    }
    let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("{}: {}", label, joined.join(", "))
}

/// Format a key/value mapping as a two-column table
pub fn format_map<K: Display, V: Display>(headers: [&str; 2], map: &BTreeMap<K, V>) -> String {
    format_grid(
        &headers,
        map.iter()
            .map(|(key, value)| vec![key.to_string(), value.to_string()]),
    )
}

/// Format pairs as a two-column table, in the given order
pub fn format_pairs<A: Display, B: Display>(headers: [&str; 2], pairs: &[(A, B)]) -> String {
    format_grid(
        &headers,
        pairs.iter().map(|(a, b)| vec![a.to_string(), b.to_string()]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(12.25), "12.25");
        assert_eq!(format_average(3.0), "3.00");
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result("Year", Some(2015)), "Year: 2015");
        assert_eq!(format_result::<i64>("Year", None), "Year: (none)");
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list("Oldest", &["Ann", "Bob"]), "Oldest: Ann, Bob");
        assert_eq!(format_list::<String>("Oldest", &[]), "Oldest: (none)");
    }

    #[test]
    fn test_format_map() {
        let mut map = BTreeMap::new();
        map.insert("Sony".to_string(), 2);
        let output = format_map(["Manufacturer", "Count"], &map);
        assert!(output.contains("Manufacturer"));
        assert!(output.contains("Sony"));
    }
}
