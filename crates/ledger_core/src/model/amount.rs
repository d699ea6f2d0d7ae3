//! Decimal amount parsing.
//!
//! Callers hand raw user text to the ledger store; this module decides what
//! counts as a numeric value. Anything else is treated as "no change".

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses user-entered text into a decimal amount.
///
/// Accepts plain (`"3.50"`, `"-12"`, `"+4"`) and scientific (`"1e3"`)
/// notation after trimming surrounding whitespace.
///
/// Returns `None` for empty or non-numeric input, digit separators (`_`),
/// and values that would only fit after rounding away written digits.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }

    if let Ok(value) = Decimal::from_str(trimmed) {
        return is_exact(value, trimmed).then_some(value);
    }

    let mantissa = trimmed.split(['e', 'E']).next()?;
    let exact_mantissa = Decimal::from_str(mantissa)
        .ok()
        .is_some_and(|value| is_exact(value, mantissa));
    if !exact_mantissa {
        return None;
    }
    Decimal::from_scientific(trimmed).ok()
}

// Decimal keeps the written scale unless it had to round.
fn is_exact(value: Decimal, written: &str) -> bool {
    let fraction_digits = written
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    value.scale() as usize == fraction_digits
}
