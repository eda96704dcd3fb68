//! Display formatting for signed amounts.
//!
//! Accumulation stays exact; rounding to two places happens here and only
//! here, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimal places for display.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `"<+|-> <currency> <abs, 2dp, thousands-grouped>"`.
///
/// The sign is taken after rounding, so zero and amounts that round to zero
/// render with `+`.
pub fn format_signed_amount(amount: Decimal, currency: &str) -> String {
    let rounded = round_for_display(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        '-'
    } else {
        '+'
    };
    format!("{sign} {currency} {}", group_thousands(rounded.abs()))
}

/// Unsigned form: `"<currency> <abs, 2dp, grouped>"`, with a leading `-`
/// for negatives. Used for totals where an explicit `+` reads oddly.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = round_for_display(amount);
    let grouped = group_thousands(rounded.abs());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{currency} {grouped}")
    } else {
        format!("{currency} {grouped}")
    }
}

fn group_thousands(value: Decimal) -> String {
    let text = value.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{fraction}")
}
