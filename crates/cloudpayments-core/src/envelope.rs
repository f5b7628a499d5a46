//! # Response Envelope
//!
//! The decoded top-level JSON object returned by every gateway call.
//! Keys are read lazily; a missing key is "absent", never an error by itself.

use crate::lenient;
use crate::reason::UNRECOGNIZED_REASON_CODE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level success flag.
pub const SUCCESS_KEY: &str = "Success";
/// Human-readable rejection message, present on failure.
pub const MESSAGE_KEY: &str = "Message";
/// Nested resource (transaction, 3-D Secure challenge, receipt, ...).
pub const MODEL_KEY: &str = "Model";
/// Decline code inside `Model`. Zero means no decline.
pub const REASON_CODE_KEY: &str = "ReasonCode";

/// Decoded response body from the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Create an empty envelope
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a decoded JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Success` is present and truthy.
    pub fn is_success(&self) -> bool {
        self.get(SUCCESS_KEY).is_some_and(is_truthy)
    }

    /// `Success` is present, not null, and falsy.
    ///
    /// An absent flag is not an explicit failure.
    pub fn is_explicit_failure(&self) -> bool {
        self.get(SUCCESS_KEY)
            .is_some_and(|v| !v.is_null() && !is_truthy(v))
    }

    /// Non-empty `Message` string.
    pub fn message(&self) -> Option<&str> {
        self.get(MESSAGE_KEY)
            .filter(|v| is_truthy(v))
            .and_then(Value::as_str)
    }

    /// `Message` is present and truthy, whatever its JSON type.
    pub fn has_message(&self) -> bool {
        self.get(MESSAGE_KEY).is_some_and(is_truthy)
    }

    pub fn model(&self) -> Option<&Value> {
        self.get(MODEL_KEY).filter(|v| !v.is_null())
    }

    /// `Model.ReasonCode` as an integer. Integral floats and numeric strings count.
    pub fn reason_code(&self) -> Option<i64> {
        self.raw_reason_code().and_then(lenient::integer)
    }

    /// Decline code when `Model.ReasonCode` is present and not zero.
    ///
    /// A present code that is not numeric yields `UNRECOGNIZED_REASON_CODE`.
    pub fn decline_code(&self) -> Option<i64> {
        match lenient::integer(self.raw_reason_code()?) {
            Some(0) => None,
            Some(code) => Some(code),
            None => Some(UNRECOGNIZED_REASON_CODE),
        }
    }

    fn raw_reason_code(&self) -> Option<&Value> {
        self.model()
            .and_then(|m| m.get(REASON_CODE_KEY))
            .filter(|v| !v.is_null())
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.into_value()
    }
}

/// Loose truthiness used by the gateway's flags.
///
/// `null`, `false`, `0`, `""`, `"0"` and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        Envelope::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Envelope::from_value(json!([1, 2])).is_none());
        assert!(Envelope::from_value(json!("ok")).is_none());
        assert!(Envelope::from_value(Value::Null).is_none());
        assert!(Envelope::from_value(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_success_flag() {
        assert!(envelope(json!({"Success": true})).is_success());
        assert!(!envelope(json!({"Success": false})).is_success());
        assert!(!envelope(json!({})).is_success());
        assert!(!envelope(json!({"Success": null})).is_success());
    }

    #[test]
    fn test_explicit_failure_requires_present_flag() {
        assert!(envelope(json!({"Success": false})).is_explicit_failure());
        assert!(envelope(json!({"Success": 0})).is_explicit_failure());
        assert!(!envelope(json!({})).is_explicit_failure());
        assert!(!envelope(json!({"Success": null})).is_explicit_failure());
        assert!(!envelope(json!({"Success": true})).is_explicit_failure());
    }

    #[test]
    fn test_message() {
        assert_eq!(
            envelope(json!({"Message": "Invalid Card"})).message(),
            Some("Invalid Card")
        );
        assert_eq!(envelope(json!({"Message": ""})).message(), None);
        assert_eq!(envelope(json!({"Message": null})).message(), None);
        assert!(!envelope(json!({})).has_message());
    }

    #[test]
    fn test_reason_code() {
        let declined = envelope(json!({"Model": {"ReasonCode": 5051}}));
        assert_eq!(declined.reason_code(), Some(5051));
        assert_eq!(declined.decline_code(), Some(5051));

        let zero = envelope(json!({"Model": {"ReasonCode": 0}}));
        assert_eq!(zero.reason_code(), Some(0));
        assert_eq!(zero.decline_code(), None);

        let stringly = envelope(json!({"Model": {"ReasonCode": "5005"}}));
        assert_eq!(stringly.decline_code(), Some(5005));

        let float = envelope(json!({"Model": {"ReasonCode": 5051.0}}));
        assert_eq!(float.decline_code(), Some(5051));

        let zero_string = envelope(json!({"Model": {"ReasonCode": "0"}}));
        assert_eq!(zero_string.decline_code(), None);

        assert_eq!(envelope(json!({"Model": null})).reason_code(), None);
        assert_eq!(envelope(json!({"Model": {"ReasonCode": null}})).decline_code(), None);
        assert_eq!(envelope(json!({"Success": false})).decline_code(), None);
    }

    #[test]
    fn test_unparseable_reason_code_still_declines() {
        let declined = envelope(json!({"Model": {"ReasonCode": "N/A"}}));
        assert_eq!(declined.reason_code(), None);
        assert_eq!(declined.decline_code(), Some(UNRECOGNIZED_REASON_CODE));

        let declined = envelope(json!({"Model": {"ReasonCode": false}}));
        assert_eq!(declined.decline_code(), Some(UNRECOGNIZED_REASON_CODE));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!(0.0)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!({"a": 1})));
    }
}
