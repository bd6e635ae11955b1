// Lenient numeric input handling for editor fields.
//
// Every numeric field of a bill (dimensions, prices, percentages, discount
// values, quantities) reaches the engine either as raw form text or as a JSON
// value of unknown shape. Both paths go through this module so a cleared or
// garbled field always collapses to the same default: 0 for amounts and
// dimensions, 1 for quantities.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Scale used for display-only derived amounts (per-item discount, net total)
pub const MONEY_SCALE: u32 = 2;

/// Parse a decimal from free text
///
/// Accepts plain (`"12.5"`) and scientific (`"1.2e3"`) notation.
/// Returns `None` for empty or non-numeric text.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse a non-negative amount, dimension or percentage
///
/// Empty, non-numeric and negative input all yield zero.
pub fn decimal_or_zero(text: &str) -> Decimal {
    non_negative(parse_decimal(text).unwrap_or(Decimal::ZERO))
}

/// Parse a quantity
///
/// Fractions are truncated. Anything that does not end up as a positive
/// integer yields 1.
pub fn quantity_or_one(text: &str) -> u32 {
    parse_decimal(text)
        .map(|value| value.trunc())
        .and_then(|value| value.to_u32())
        .map(normalize_quantity)
        .unwrap_or(1)
}

/// Quantity of zero is treated as the default of one
pub fn normalize_quantity(quantity: u32) -> u32 {
    if quantity == 0 {
        1
    } else {
        quantity
    }
}

/// Floor a value at zero
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp `value` into `[lo, hi]`
///
/// When `hi < lo` the lower bound wins.
pub fn clamp(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    value.min(hi).max(lo)
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

/// serde helper: decimal field that defaults to zero on missing, empty,
/// `null` or non-numeric input
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(non_negative(
        value
            .as_ref()
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO),
    ))
}

/// serde helper: optional decimal field, `None` on missing or unusable input
pub fn lenient_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value).map(non_negative))
}

/// serde helper: quantity field that defaults to one
pub fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => quantity_or_one(&number.to_string()),
        Some(Value::String(text)) => quantity_or_one(&text),
        _ => 1,
    })
}

/// Default for serde `default = ...` attributes on quantity fields
pub fn default_quantity() -> u32 {
    1
}
