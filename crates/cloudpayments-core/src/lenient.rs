//! Loose scalar decoding for gateway fields.
//!
//! The gateway is not strict about JSON types: ids may arrive as numbers or
//! strings, codes as integers, floats or numeric strings. These helpers
//! coerce what they can and return `None` for anything else.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer from an integer, an integral float, or a numeric string.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// serde adapters for `#[serde(deserialize_with = "...")]`

pub(crate) fn de_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(integer(&Value::deserialize(d)?))
}

pub(crate) fn de_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(number(&Value::deserialize(d)?))
}

pub(crate) fn de_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(string(&Value::deserialize(d)?))
}

pub(crate) fn de_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(boolean(&Value::deserialize(d)?))
}

/// Any value that does not decode as `T` becomes `None`.
pub(crate) fn de_or_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(d)?).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer() {
        assert_eq!(integer(&json!(5051)), Some(5051));
        assert_eq!(integer(&json!(5051.0)), Some(5051));
        assert_eq!(integer(&json!(" 5005 ")), Some(5005));
        assert_eq!(integer(&json!("0.0")), Some(0));
        assert_eq!(integer(&json!(50.5)), None);
        assert_eq!(integer(&json!("N/A")), None);
        assert_eq!(integer(&json!(true)), None);
    }

    #[test]
    fn test_string_and_number() {
        assert_eq!(string(&json!(1001)).as_deref(), Some("1001"));
        assert_eq!(string(&json!("inv")).as_deref(), Some("inv"));
        assert_eq!(string(&json!({"a": 1})), None);
        assert_eq!(number(&json!("10.50")), Some(10.5));
        assert_eq!(number(&json!([])), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(&json!(true)), Some(true));
        assert_eq!(boolean(&json!(0)), Some(false));
        assert_eq!(boolean(&json!("True")), Some(true));
        assert_eq!(boolean(&json!("yes")), None);
    }
}
