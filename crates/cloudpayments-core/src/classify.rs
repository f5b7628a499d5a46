//! # Response Classification
//!
//! Every gateway operation turns its decoded envelope into exactly one of:
//! a success value, `PaymentError::RequestFailed`, or
//! `PaymentError::PaymentDeclined`. The rule used depends on the operation:
//!
//! ```text
//! confirm / void / refund / find / list / orders   not explicitly failed
//! connectivity test / receipts                     Success must be truthy
//! card & token charges                             Success → Message → ReasonCode → 3-D Secure
//! 3-D Secure confirmation                          Message → ReasonCode → Transaction
//! SBP link                                          pass-through, never fails
//! ```

use crate::envelope::Envelope;
use crate::error::{PaymentError, PaymentResult};
use crate::model::{ChargeOutcome, Required3DS, Transaction};
use serde_json::Value;

/// Fail only when `Success` is present and falsy.
///
/// An envelope without a `Success` key passes.
pub fn ensure_not_failed(envelope: Envelope) -> PaymentResult<Envelope> {
    if envelope.is_explicit_failure() {
        return Err(PaymentError::request_failed(envelope));
    }
    Ok(envelope)
}

/// Fail unless `Success` is present and truthy.
pub fn ensure_success(envelope: Envelope) -> PaymentResult<Envelope> {
    if !envelope.is_success() {
        return Err(PaymentError::request_failed(envelope));
    }
    Ok(envelope)
}

/// Decode `Model` as a transaction unless the envelope is explicitly failed.
pub fn transaction_unless_failed(envelope: Envelope) -> PaymentResult<Transaction> {
    let envelope = ensure_not_failed(envelope)?;
    Transaction::from_model(envelope.model())
}

/// Decode `Model` as a list of transactions unless the envelope is explicitly failed.
///
/// A single object model is treated as a one-element list.
pub fn transactions_unless_failed(envelope: Envelope) -> PaymentResult<Vec<Transaction>> {
    let envelope = ensure_not_failed(envelope)?;
    match envelope.model() {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Transaction::from_model(Some(item)))
            .collect(),
        Some(model) => Ok(vec![Transaction::from_model(Some(model))?]),
    }
}

/// Three-way classification for card and token charges.
///
/// Evaluated strictly in order: a truthy `Success` completes the charge, a
/// message rejects the request, a nonzero reason code declines the payment,
/// and anything left is a 3-D Secure challenge.
pub fn classify_charge(envelope: Envelope) -> PaymentResult<ChargeOutcome> {
    if envelope.is_success() {
        return Transaction::from_model(envelope.model()).map(ChargeOutcome::Completed);
    }

    if let Some(err) = reject_or_decline(&envelope) {
        return Err(err);
    }

    Required3DS::from_model(envelope.model()).map(ChargeOutcome::Requires3ds)
}

/// Classification for 3-D Secure confirmation.
///
/// Same rejection precedence as a charge, but the fallback is a transaction.
pub fn classify_3ds_confirmation(envelope: Envelope) -> PaymentResult<Transaction> {
    if let Some(err) = reject_or_decline(&envelope) {
        return Err(err);
    }

    Transaction::from_model(envelope.model())
}

// Message is checked before ReasonCode so a readable reason wins.
fn reject_or_decline(envelope: &Envelope) -> Option<PaymentError> {
    if envelope.has_message() {
        return Some(PaymentError::request_failed(envelope.clone()));
    }

    envelope
        .decline_code()
        .map(|code| PaymentError::payment_declined(code, envelope.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::UNRECOGNIZED_REASON_CODE;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        Envelope::from_value(value).unwrap()
    }

    #[test]
    fn test_charge_success() {
        let outcome =
            classify_charge(envelope(json!({"Success": true, "Model": {"TransactionId": 42}})))
                .unwrap();

        assert_eq!(outcome.transaction().unwrap().transaction_id, Some(42));
    }

    #[test]
    fn test_charge_message_is_request_failure() {
        let err = classify_charge(envelope(json!({"Success": false, "Message": "Invalid Card"})))
            .unwrap_err();

        assert!(matches!(err, PaymentError::RequestFailed { .. }));
        assert_eq!(err.message(), Some("Invalid Card"));
    }

    #[test]
    fn test_charge_message_wins_over_reason_code() {
        let err = classify_charge(envelope(json!({
            "Success": false,
            "Message": "Declined",
            "Model": {"ReasonCode": 5051}
        })))
        .unwrap_err();

        assert!(matches!(err, PaymentError::RequestFailed { .. }));
    }

    #[test]
    fn test_charge_reason_code_is_decline() {
        let err = classify_charge(envelope(json!({"Success": false, "Model": {"ReasonCode": 5051}})))
            .unwrap_err();

        assert!(err.is_declined());
        assert_eq!(err.reason_code(), Some(5051));
    }

    #[test]
    fn test_charge_success_tolerates_field_types() {
        let outcome = classify_charge(envelope(json!({
            "Success": true,
            "Model": {"TransactionId": 42, "InvoiceId": 1001, "Unexpected": [1, 2]}
        })))
        .unwrap();

        let tx = outcome.transaction().unwrap();
        assert_eq!(tx.transaction_id, Some(42));
        assert_eq!(tx.invoice_id.as_deref(), Some("1001"));
        assert_eq!(tx.field("Unexpected"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_charge_float_reason_code_is_decline() {
        let err = classify_charge(envelope(json!({"Success": false, "Model": {"ReasonCode": 5051.0}})))
            .unwrap_err();

        assert!(err.is_declined());
        assert_eq!(err.reason_code(), Some(5051));
    }

    #[test]
    fn test_charge_unparseable_reason_code_is_decline() {
        let err = classify_charge(envelope(json!({"Success": false, "Model": {"ReasonCode": "N/A"}})))
            .unwrap_err();

        assert!(err.is_declined());
        assert_eq!(err.reason_code(), Some(UNRECOGNIZED_REASON_CODE));
    }

    #[test]
    fn test_charge_empty_message_falls_through() {
        let err = classify_charge(envelope(json!({
            "Success": false,
            "Message": "",
            "Model": {"ReasonCode": 5005}
        })))
        .unwrap_err();

        assert_eq!(err.reason_code(), Some(5005));
    }

    #[test]
    fn test_charge_zero_reason_requires_3ds() {
        let outcome = classify_charge(envelope(json!({
            "Success": false,
            "Model": {"ReasonCode": 0, "AcsUrl": "https://3ds"}
        })))
        .unwrap();

        let challenge = outcome.challenge().unwrap();
        assert_eq!(challenge.acs_url.as_deref(), Some("https://3ds"));
    }

    #[test]
    fn test_charge_absent_reason_requires_3ds() {
        let outcome = classify_charge(envelope(json!({
            "Model": {"TransactionId": 9, "PaReq": "abc", "AcsUrl": "https://acs"}
        })))
        .unwrap();

        assert!(!outcome.is_completed());
        assert_eq!(outcome.challenge().unwrap().transaction_id, Some(9));
    }

    #[test]
    fn test_3ds_confirmation() {
        let tx = classify_3ds_confirmation(envelope(json!({
            "Success": true,
            "Model": {"TransactionId": 5, "Status": "Completed"}
        })))
        .unwrap();
        assert!(tx.is_completed());

        let err = classify_3ds_confirmation(envelope(json!({
            "Success": false,
            "Model": {"ReasonCode": 5206}
        })))
        .unwrap_err();
        assert_eq!(err.reason_code(), Some(5206));

        let err = classify_3ds_confirmation(envelope(json!({"Message": "Bad PaRes"}))).unwrap_err();
        assert!(matches!(err, PaymentError::RequestFailed { .. }));
    }

    #[test]
    fn test_3ds_confirmation_zero_reason_is_transaction() {
        let tx = classify_3ds_confirmation(envelope(json!({
            "Success": false,
            "Model": {"TransactionId": 5, "ReasonCode": 0}
        })))
        .unwrap();
        assert_eq!(tx.transaction_id, Some(5));
    }

    #[test]
    fn test_3ds_confirmation_string_zero_reason_is_transaction() {
        let tx = classify_3ds_confirmation(envelope(json!({
            "Success": false,
            "Model": {"TransactionId": 5, "ReasonCode": "0"}
        })))
        .unwrap();

        assert_eq!(tx.transaction_id, Some(5));
        assert_eq!(tx.reason_code, Some(0));
    }

    #[test]
    fn test_ensure_not_failed() {
        assert!(ensure_not_failed(envelope(json!({}))).is_ok());
        assert!(ensure_not_failed(envelope(json!({"Success": true}))).is_ok());
        assert!(ensure_not_failed(envelope(json!({"Success": false}))).is_err());
    }

    #[test]
    fn test_ensure_success() {
        assert!(ensure_success(envelope(json!({"Success": true}))).is_ok());
        assert!(ensure_success(envelope(json!({}))).is_err());
        assert!(ensure_success(envelope(json!({"Success": null}))).is_err());
        assert!(ensure_success(envelope(json!({"Success": false}))).is_err());
    }

    #[test]
    fn test_transactions_list() {
        let list = transactions_unless_failed(envelope(json!({
            "Success": true,
            "Model": [{"TransactionId": 1}, {"TransactionId": 2}]
        })))
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].transaction_id, Some(2));

        let single =
            transactions_unless_failed(envelope(json!({"Model": {"TransactionId": 3}}))).unwrap();
        assert_eq!(single.len(), 1);

        assert!(transactions_unless_failed(envelope(json!({"Success": true})))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_transaction_unless_failed() {
        let err = transaction_unless_failed(envelope(json!({
            "Success": false,
            "Message": "Not found"
        })))
        .unwrap_err();
        assert_eq!(err.message(), Some("Not found"));

        let tx = transaction_unless_failed(envelope(json!({
            "Success": true,
            "Model": {"InvoiceId": "inv-1"}
        })))
        .unwrap();
        assert_eq!(tx.invoice_id.as_deref(), Some("inv-1"));
    }
}
