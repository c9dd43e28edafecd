//! Parsers for the scalar fields of a recipe's structured data.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::NormalizeError;

/// Durations come in the form `P0DT1H30M`.
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P([0-9]+)DT([0-9]+)H([0-9]+)M").expect("duration pattern is valid")
});

/// A leading number with an optional unit word, e.g. `"12.5 g"` or `"300 calories"`.
static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)(?:\s*[[:alpha:]]+)?").expect("quantity pattern is valid")
});

/// Parse a `PxDTyHzM` duration into minutes.
pub fn parse_duration(s: &str) -> Result<u64, NormalizeError> {
    let invalid = || NormalizeError::Format(format!("duration {s:?} is not of the form PxDTyHzM"));

    let captures = DURATION.captures(s).ok_or_else(invalid)?;
    let field = |index: usize| captures[index].parse::<u64>().map_err(|_| invalid());

    let days = field(1)?;
    let hours = field(2)?;
    let minutes = field(3)?;

    days.checked_mul(24 * 60)
        .and_then(|total| total.checked_add(hours.checked_mul(60)?))
        .and_then(|total| total.checked_add(minutes))
        .ok_or_else(invalid)
}

/// Parse the number at the start of `s`, ignoring an optional unit word after it.
pub fn parse_quantity_with_suffix(s: &str) -> Result<f64, NormalizeError> {
    let captures = LEADING_QUANTITY
        .captures(s)
        .ok_or_else(|| NormalizeError::Format(format!("{s:?} does not start with a number")))?;

    captures[1]
        .parse::<f64>()
        .map_err(|e| NormalizeError::Format(format!("{s:?}: {e}")))
}

/// Nutrient content such as `"12 g"` or `"95 mg"`.
pub fn parse_content(s: &str) -> Result<f64, NormalizeError> {
    parse_quantity_with_suffix(s)
}

/// Energy content such as `"300 calories"`.
pub fn parse_calories(s: &str) -> Result<f64, NormalizeError> {
    parse_quantity_with_suffix(s)
}
