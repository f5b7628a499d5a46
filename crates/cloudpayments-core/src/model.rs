//! # Result Models
//!
//! Resources decoded from the envelope's `Model` object.
//! Well-known fields are typed; everything else the gateway sends is kept in
//! `extra` so no data is lost.

use crate::error::{PaymentError, PaymentResult};
use crate::lenient;
use crate::reason::ReasonCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transaction lifecycle status reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    AwaitingAuthentication,
    Authorized,
    Completed,
    Cancelled,
    Declined,
    #[serde(other)]
    Unknown,
}

/// A gateway transaction resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(
        deserialize_with = "lenient::de_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<i64>,

    #[serde(
        deserialize_with = "lenient::de_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_id: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TransactionStatus>,

    #[serde(
        deserialize_with = "lenient::de_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<i64>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason_code: Option<i64>,

    /// Message intended for the card holder
    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_holder_message: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_first_six: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_last_four: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_type: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_exp_date: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub issuer: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub issuer_bank_country: Option<String>,

    /// Card holder name
    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Stored-card token for subsequent token charges
    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_code: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub test_mode: Option<bool>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_address: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date_iso: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_date_iso: Option<String>,

    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirm_date_iso: Option<String>,

    /// Any other field returned by the gateway
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Decode from the envelope's `Model`. A missing model yields an empty transaction.
    pub fn from_model(model: Option<&Value>) -> PaymentResult<Self> {
        decode_model(model, "transaction")
    }

    /// Decoded decline reason, if the code is a documented one
    pub fn reason(&self) -> Option<ReasonCode> {
        self.reason_code.and_then(ReasonCode::from_code)
    }

    pub fn is_completed(&self) -> bool {
        self.status == Some(TransactionStatus::Completed)
    }

    pub fn is_authorized(&self) -> bool {
        self.status == Some(TransactionStatus::Authorized)
    }

    /// Look up a field the gateway sent that has no typed counterpart
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// A 3-D Secure challenge returned instead of a completed charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Required3DS {
    #[serde(
        deserialize_with = "lenient::de_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<i64>,

    /// Payer authentication request to post to the ACS
    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pa_req: Option<String>,

    /// Issuer access control server URL
    #[serde(
        deserialize_with = "lenient::de_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub acs_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Required3DS {
    /// Decode from the envelope's `Model`. A missing model yields an empty challenge.
    pub fn from_model(model: Option<&Value>) -> PaymentResult<Self> {
        decode_model(model, "3-D Secure challenge")
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Outcome of a card or token charge that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeOutcome {
    /// The charge (or authorization) went through
    Completed(Transaction),
    /// The issuer requires a 3-D Secure step-up before completing
    Requires3ds(Required3DS),
}

impl ChargeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ChargeOutcome::Completed(_))
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            ChargeOutcome::Completed(tx) => Some(tx),
            ChargeOutcome::Requires3ds(_) => None,
        }
    }

    pub fn challenge(&self) -> Option<&Required3DS> {
        match self {
            ChargeOutcome::Requires3ds(challenge) => Some(challenge),
            ChargeOutcome::Completed(_) => None,
        }
    }

    pub fn into_transaction(self) -> Option<Transaction> {
        match self {
            ChargeOutcome::Completed(tx) => Some(tx),
            ChargeOutcome::Requires3ds(_) => None,
        }
    }
}

trait ModelFields: Serialize + DeserializeOwned + Default {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

impl ModelFields for Transaction {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

impl ModelFields for Required3DS {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

fn decode_model<T: ModelFields>(model: Option<&Value>, what: &str) -> PaymentResult<T> {
    let fields = match model {
        None | Some(Value::Null) => return Ok(T::default()),
        Some(Value::Object(fields)) => fields,
        Some(_) => {
            return Err(PaymentError::Serialization(format!(
                "Failed to decode {}: model is not an object",
                what
            )))
        }
    };

    let mut decoded: T = serde_json::from_value(Value::Object(fields.clone()))
        .map_err(|e| PaymentError::Serialization(format!("Failed to decode {}: {}", what, e)))?;
    keep_unmapped(&mut decoded, fields, what)?;

    Ok(decoded)
}

/// A value no typed field could take is kept verbatim in `extra`.
fn keep_unmapped<T: ModelFields>(
    decoded: &mut T,
    fields: &Map<String, Value>,
    what: &str,
) -> PaymentResult<()> {
    let mapped = serde_json::to_value(&*decoded)
        .map_err(|e| PaymentError::Serialization(format!("Failed to decode {}: {}", what, e)))?;

    let unmapped: Vec<(String, Value)> = fields
        .iter()
        .filter(|(key, value)| !value.is_null() && mapped.get(key.as_str()).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    decoded.extra_mut().extend(unmapped);
    Ok(())
}
