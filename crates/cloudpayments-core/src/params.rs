//! # Request Parameters
//!
//! Ordered field name → value mapping sent as the JSON request body.
//! Operation defaults are built first, caller-supplied fields are merged over
//! them, and the dispatcher injects the locale last.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder: set a field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder: set a field only when a value is given
    pub fn with_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge `overrides` over these parameters. On key collision the override wins.
    pub fn merge(mut self, overrides: Params) -> Self {
        for (key, value) in overrides.0 {
            self.0.insert(key, value);
        }
        self
    }

    /// Build parameters from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: Value) -> PaymentResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(PaymentError::InvalidRequest(format!(
                "request parameters must be a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Build parameters from any serializable struct or map.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> PaymentResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| PaymentError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
