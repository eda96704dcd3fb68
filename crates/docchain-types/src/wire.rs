//! Serde adapters for the loosely typed fields of the backend's JSON.
//!
//! Identifiers arrive as strings or integers. Amounts arrive as JSON
//! numbers, which the decoder reads as `f64`, or as decimal strings. On
//! output an amount is written as a number when `f64` holds it exactly and
//! as a decimal string otherwise, so re-encoding a graph never loses digits.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Unsigned(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

/// Accept `"24"` or `24` as the identifier `"24"`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// [`string_or_number`] for optional fields; `null` decodes as `None`.
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Exact decimal amounts: `#[serde(with = "crate::wire::amount")]`.
pub mod amount {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum RawAmount {
        Text(String),
        Int(i64),
        Unsigned(u64),
        Float(f64),
    }

    impl RawAmount {
        pub(super) fn into_decimal(self) -> Result<Decimal, String> {
            match self {
                RawAmount::Text(s) => Decimal::from_str(s.trim())
                    .or_else(|_| Decimal::from_scientific(s.trim()))
                    .map_err(|e| format!("invalid amount {s:?}: {e}")),
                RawAmount::Int(n) => Ok(Decimal::from(n)),
                RawAmount::Unsigned(n) => Ok(Decimal::from(n)),
                // Shortest round-trip text of the float, so 0.1 stays 0.1.
                RawAmount::Float(f) => Decimal::from_str(&f.to_string())
                    .map_err(|e| format!("amount {f} out of range: {e}")),
            }
        }
    }

    /// The `f64` form of `value`, when reading it back yields the same
    /// decimal.
    pub(super) fn fits_f64(value: Decimal) -> Option<f64> {
        let float = value.to_f64()?;
        let back = Decimal::from_str(&float.to_string()).ok()?;
        (back == value).then_some(float)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match fits_f64(*value) {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&value.to_string()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAmount::deserialize(deserializer)?
            .into_decimal()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// [`amount`] for optional fields.
pub mod amount_option {
    use super::amount::{fits_f64, RawAmount};
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            None => serializer.serialize_none(),
            Some(v) => match fits_f64(*v) {
                Some(float) => serializer.serialize_some(&float),
                None => serializer.serialize_some(&v.to_string()),
            },
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawAmount>::deserialize(deserializer)?
            .map(RawAmount::into_decimal)
            .transpose()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}
