//! Field validators
//!
//! Pure predicates over raw user input. A validator returning `false` makes
//! the interactive flows re-prompt and the scripted flows fail with
//! [`crate::ErpError::Validation`]. None of them know how input is gathered,
//! so they are usable on their own.
//!
//! Validators that depend on the reference year take it as an argument; the
//! managers capture it from [`crate::config::Settings`] when building their
//! schemas.

use crate::models::ids::could_be_a_valid_id;

/// Transaction types accepted by the accounting manager
pub const TRANSACTION_TYPES: [&str; 2] = ["in", "out"];

/// Values accepted for yes/no columns
pub const BOOLEAN_VALUES: [&str; 2] = ["0", "1"];

/// Parse an integer, ignoring surrounding whitespace
fn parse_int(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Check that the input is an integer
pub fn validate_int(input: &str) -> bool {
    parse_int(input).is_some()
}

/// Check that the input is an integer within `min..=max`
pub fn validate_int_in_range(input: &str, min: i64, max: i64) -> bool {
    parse_int(input).is_some_and(|value| (min..=max).contains(&value))
}

/// Check that the input is a month number (1-12)
pub fn validate_month(input: &str) -> bool {
    validate_int_in_range(input, 1, 12)
}

/// Check that the input is a day number (1-31)
pub fn validate_day(input: &str) -> bool {
    validate_int_in_range(input, 1, 31)
}

/// Check that the input is a year no later than `reference_year`
pub fn validate_year_by(input: &str, reference_year: i32) -> bool {
    parse_int(input).is_some_and(|year| year <= i64::from(reference_year))
}

/// Check that the input is a year no earlier than `reference_year`
pub fn validate_year_from(input: &str, reference_year: i32) -> bool {
    parse_int(input).is_some_and(|year| year >= i64::from(reference_year))
}

/// Check that the input is exactly one of `options`
pub fn validate_one_of(input: &str, options: &[&str]) -> bool {
    options.contains(&input)
}

/// Check that the input is a transaction type (`in` or `out`)
pub fn validate_type(input: &str) -> bool {
    validate_one_of(input, &TRANSACTION_TYPES)
}

/// Check that the input is `0` or `1`
pub fn validate_boolean(input: &str) -> bool {
    validate_one_of(input, &BOOLEAN_VALUES)
}

/// Check that the input is not blank
pub fn validate_string(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Minimal e-mail shape check
///
/// Requires exactly one `@` that is neither the first nor the last character,
/// and a `.` inside the domain part that is neither its first nor its last
/// character. This is not RFC 5322.
pub fn validate_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Check that the input could reference a record in another table
pub fn validate_id_possible(input: &str) -> bool {
    could_be_a_valid_id(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_int() {
        assert!(validate_int("42"));
        assert!(validate_int("-7"));
        assert!(validate_int(" 3 "));
        assert!(!validate_int("4.2"));
        assert!(!validate_int("abc"));
        assert!(!validate_int(""));
    }

    #[test]
    fn test_validate_month_boundaries() {
        assert!(!validate_month("0"));
        assert!(validate_month("1"));
        assert!(validate_month("12"));
        assert!(!validate_month("13"));
        assert!(!validate_month("may"));
    }

    #[test]
    fn test_validate_day_boundaries() {
        assert!(!validate_day("0"));
        assert!(validate_day("1"));
        assert!(validate_day("31"));
        assert!(!validate_day("32"));
    }

    #[test]
    fn test_validate_year_by() {
        assert!(validate_year_by("2016", 2017));
        assert!(validate_year_by("2017", 2017));
        assert!(!validate_year_by("2018", 2017));
        assert!(!validate_year_by("last year", 2017));
    }

    #[test]
    fn test_validate_year_from() {
        assert!(validate_year_from("2018", 2017));
        assert!(validate_year_from("2017", 2017));
        assert!(!validate_year_from("2016", 2017));
        assert!(!validate_year_from("", 2017));
    }

    #[test]
    fn test_enumerations() {
        assert!(validate_type("in"));
        assert!(validate_type("out"));
        assert!(!validate_type("IN"));
        assert!(!validate_type("sideways"));

        assert!(validate_boolean("0"));
        assert!(validate_boolean("1"));
        assert!(!validate_boolean("2"));
        assert!(!validate_boolean("yes"));

        assert!(validate_one_of("b", &["a", "b"]));
        assert!(!validate_one_of("c", &["a", "b"]));
    }

    #[test]
    fn test_validate_string() {
        assert!(validate_string("Astebreed"));
        assert!(!validate_string(""));
        assert!(!validate_string("   "));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("hv8@qsuotla508.com"));
        assert!(validate_email("-cip@jlyzpvm.com"));
        assert!(validate_email("a@b.c"));

        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("two@@signs.com"));
        assert!(!validate_email("a@b@c.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("user@.com"));
        assert!(!validate_email("user@example."));
    }

    #[test]
    fn test_validate_id_possible() {
        assert!(validate_id_possible("kH14Jt#&"));
        assert!(!validate_id_possible("customer"));
    }
}
