//! Numeral formatting for the expense ledger.
//!
//! Converts between raw numeric values, grouped-decimal strings such as
//! `1,234.50`, and English word expansions such as
//! `One Thousand Two Hundred Thirty Four`. Everything here is a pure function.
//!
//! `live_group_keystroke` is the string half of the amount field's live
//! formatting. It does not know where the caret was; after re-inserting
//! separators the caret may jump to the end of the field. Restoring the caret
//! position is left to the presentation layer.

use tracing::warn;

use super::input_sanitizer::sanitize_amount;

const BELOW_TWENTY: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

// Short scale, one entry per base-1000 group. Seven groups cover u64::MAX.
const SCALES: [&str; 7] = [
    "", "Thousand", "Million", "Billion", "Trillion", "Quadrillion", "Quintillion",
];

/// Render a value with exactly two decimals and thousands separators.
///
/// `1234.5` becomes `"1,234.50"`. Non-finite values render as an empty string.
pub fn group_with_separators(value: f64) -> String {
    if !value.is_finite() {
        warn!("⚠️ Cannot format non-finite value {} with separators", value);
        return String::new();
    }

    let fixed = format!("{:.2}", value.abs());
    let (integer, decimal) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}{}.{}", sign, group_digits(integer), decimal)
}

/// Format the raw contents of an amount field after a keystroke.
///
/// Invalid characters are dropped, only the first decimal point survives,
/// at most two decimal digits are kept and separators are re-inserted into
/// the integer part. A trailing decimal point the user just typed is kept.
pub fn live_group_keystroke(raw: &str) -> String {
    let cleaned = sanitize_amount(raw);

    match cleaned.split_once('.') {
        Some((integer, decimal)) => {
            let decimal: String = decimal.chars().take(2).collect();
            format!("{}.{}", group_digits(integer), decimal)
        }
        None => group_digits(&cleaned),
    }
}

/// Convert a non-negative integer into English words.
pub fn numeral_to_words(n: u64) -> String {
    if n == 0 {
        return BELOW_TWENTY[0].to_string();
    }

    let mut groups = Vec::new();
    let mut remaining = n;
    let mut scale = 0;

    while remaining > 0 {
        let group = remaining % 1000;
        if group != 0 {
            groups.push(format!("{} {}", below_thousand(group), SCALES[scale]));
        }
        remaining /= 1000;
        scale += 1;
    }

    groups.reverse();
    collapse_whitespace(&groups.join(" "))
}

/// Words for the integer part of a monetary amount.
///
/// The fraction is dropped; negative and NaN amounts read as "Zero".
pub fn amount_in_words(amount: f64) -> String {
    numeral_to_words(amount.floor() as u64)
}

/// Insert a comma before every complete group of three digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn below_hundred(n: u64) -> String {
    if n < 20 {
        return BELOW_TWENTY[n as usize].to_string();
    }
    let unit = n % 10;
    if unit == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], BELOW_TWENTY[unit as usize])
    }
}

fn below_thousand(n: u64) -> String {
    if n < 100 {
        return below_hundred(n);
    }
    let remainder = n % 100;
    let hundreds = format!("{} Hundred", BELOW_TWENTY[(n / 100) as usize]);
    if remainder == 0 {
        hundreds
    } else {
        format!("{} {}", hundreds, below_hundred(remainder))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
