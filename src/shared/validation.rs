use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Whole number as typed into a numeric form input
    /// - Valid: "7", "-3", "0012"
    /// - Invalid: "7.5", "1e3", "", " 7"
    pub static ref INTEGER_REGEX: Regex = Regex::new(r"^-?\d+$").unwrap();

    /// Plain decimal number as typed into a coordinate input
    /// - Valid: "-6.2088", "106.8456", "0"
    /// - Invalid: "NaN", "inf", "1e5", "6.", ".5", "6,2"
    pub static ref DECIMAL_REGEX: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
}

/// Parses a trimmed integer field; `None` for anything that is not a plain integer
pub fn parse_integer(input: &str) -> Option<i64> {
    let input = input.trim();
    if !INTEGER_REGEX.is_match(input) {
        return None;
    }
    input.parse().ok()
}

/// Parses a trimmed decimal field; `None` for non-numeric or non-finite input
pub fn parse_decimal(input: &str) -> Option<f64> {
    let input = input.trim();
    if !DECIMAL_REGEX.is_match(input) {
        return None;
    }
    input.parse::<f64>().ok().filter(|value| value.is_finite())
}
