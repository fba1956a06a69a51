//! Money helpers
//!
//! All pipeline arithmetic happens in `Decimal`; records and breakdowns carry
//! `f64`. Conversion happens only through these helpers.

use rust_decimal::prelude::*;

/// Monetary values: 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Combined multiplier precision
const MULTIPLIER_PLACES: u32 = 3;

/// Convert f64 to Decimal for calculation.
///
/// `None` for NaN, infinities and magnitudes beyond `Decimal::MAX`.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Round to cents (half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a combined multiplier to 3 decimal places (half-up)
#[inline]
pub fn round_multiplier(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MULTIPLIER_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Convert Decimal back to f64 without rounding (multipliers, fractions)
#[inline]
pub fn to_f64_exact(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Format a money amount for line items: `$1,156.00`, `-$12.50`
pub fn format_money(amount: f64, currency: &str) -> String {
    let Some(value) = to_decimal(amount) else {
        return format!("{}{}", currency, amount);
    };
    let rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut abs = rounded.abs();
    abs.rescale(DECIMAL_PLACES);
    let text = abs.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        currency,
        grouped,
        frac_part
    )
}
