//! Lenient numeric deserialisation.
//!
//! Velocity and offset fields are typed in by hand and have been persisted as
//! JSON numbers, numeric strings, empty strings and nulls. All of them are
//! accepted here; anything that does not parse as a number resolves to zero,
//! and JSON numbers beyond the `Decimal` range saturate.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::calculation::round_to_whole;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn to_decimal(&self) -> Decimal {
        match self {
            NumberOrText::Int(value) => Decimal::from(*value),
            NumberOrText::Float(value) => Decimal::try_from(*value).unwrap_or(
                if value.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                },
            ),
            NumberOrText::Text(text) => {
                let text = text.trim();
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .unwrap_or(Decimal::ZERO)
            }
        }
    }
}

/// Deserialises a decimal from a number, numeric string, empty string or null.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value.map(|v| v.to_decimal()).unwrap_or(Decimal::ZERO))
}

/// Deserialises a whole number the same way, rounding fractional input half
/// away from zero.
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = decimal(deserializer)?;
    Ok(round_to_whole(value))
}

/// Deserialises a list, treating `null` the same as a missing key.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
