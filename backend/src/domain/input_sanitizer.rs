//! Input sanitization for the expense forms.
//!
//! The presentation layer hands us exactly what the user typed. These helpers
//! turn that text into canonical numeric strings and numbers; validation of
//! the resulting values (positive amounts, non-empty names) lives with the
//! record store.

use super::errors::{LedgerError, LedgerResult};

const CLEAR_CONFIRMATION_WORD: &str = "CONFIRM";

/// Strip everything except digits and the first decimal point.
///
/// Idempotent: `sanitize_amount(&sanitize_amount(x)) == sanitize_amount(x)`.
pub fn sanitize_amount(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|ch| {
            if ch.is_ascii_digit() {
                true
            } else if *ch == '.' && !seen_point {
                seen_point = true;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Quantity field filter, applied on every input event.
///
/// Drops the first decimal point and everything after it, then removes all
/// minus signs.
pub fn sanitize_quantity_keystroke(raw: &str) -> String {
    let integer_part = match raw.find('.') {
        Some(point) => &raw[..point],
        None => raw,
    };
    integer_part.replace('-', "")
}

/// Parse a possibly grouped amount such as `"1,234.50"`.
pub fn parse_amount(formatted: &str) -> LedgerResult<f64> {
    let cleaned = formatted.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(LedgerError::NotANumber(formatted.to_string()));
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LedgerError::NotANumber(formatted.to_string())),
    }
}

/// Parse a quantity field. `None` unless the text holds a positive count.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let cleaned = sanitize_quantity_keystroke(raw.trim());
    let value = cleaned.trim().parse::<f64>().ok()?;
    normalize_quantity(value)
}

/// Truncate a quantity to its integer part; `None` if that is not positive.
pub fn normalize_quantity(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    (truncated > 0.0).then_some(truncated)
}

/// Whether the bulk-clear confirmation box holds the confirmation word
pub fn is_clear_confirmed(input: &str) -> bool {
    input.trim().to_uppercase() == CLEAR_CONFIRMATION_WORD
}
