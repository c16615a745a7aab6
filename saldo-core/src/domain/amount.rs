//! Serde helpers for monetary amounts
//!
//! The API sends amounts as JSON numbers (occasionally as strings) and
//! expects numbers back.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value as JsonValue;

/// Deserialize an amount that can be a number or a string
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| n.as_f64().and_then(Decimal::from_f64_retain).ok_or(()))
            .map_err(|_| D::Error::custom(format!("invalid decimal: {}", n))),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        JsonValue::Null => Ok(Decimal::ZERO),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

/// Serialize an amount as a JSON number
pub fn serialize<S>(amount: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let value = amount
        .normalize()
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("amount out of range: {}", amount)))?;
    serializer.serialize_f64(value)
}
