use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ConvError, Result};

/// Round to cents, half away from zero. Never returns negative zero.
pub fn round_cents(val: Decimal) -> Decimal {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Amount as written on a QIF `T` line: plain, signed, two decimals.
pub fn qif_amount(val: Decimal) -> String {
    format!("{:.2}", round_cents(val))
}

/// Format a balance with thousands separators: -1,234.56
pub fn money(val: Decimal) -> String {
    let val = round_cents(val);
    let negative = val.is_sign_negative();
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Render a date with a strftime pattern. Patterns asking for fields a
/// plain date lacks (`%H`, `%z`, ...) are errors, not panics.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConvError::InvalidDateFormat(pattern.to_string()));
    }
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| ConvError::InvalidDateFormat(pattern.to_string()))?;
    Ok(out)
}

/// Reject strftime patterns that cannot render a date.
pub fn validate_date_format(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(ConvError::InvalidDateFormat("empty pattern".to_string()));
    }
    let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
    format_date(sample, pattern).map(|_| ())
}

/// 0-based (row, col) to an A1-style reference for error messages.
pub fn cell_ref(row: u32, col: u32) -> String {
    let mut letters = String::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    format!("{letters}{}", row + 1)
}
