//! # cloudpayments-core
//!
//! Core types for the CloudPayments gateway client.
//!
//! This crate provides:
//! - `Envelope` for the decoded JSON response of every gateway call
//! - `Params` for ordered, mergeable request parameters
//! - `Transaction`, `Required3DS` and `ChargeOutcome` result models
//! - `classify` functions that turn an envelope into a typed result
//! - `ReasonCode` for the gateway's decline codes
//! - `PaymentError` for typed error handling
//!
//! No I/O happens here; the HTTP side lives in `cloudpayments-client`.
//!
//! ## Example
//!
//! ```rust
//! use cloudpayments_core::{classify, ChargeOutcome, Envelope};
//! use serde_json::json;
//!
//! let envelope = Envelope::from_value(json!({
//!     "Success": true,
//!     "Model": {"TransactionId": 42}
//! }))
//! .unwrap();
//!
//! match classify::classify_charge(envelope).unwrap() {
//!     ChargeOutcome::Completed(tx) => assert_eq!(tx.transaction_id, Some(42)),
//!     ChargeOutcome::Requires3ds(_) => unreachable!(),
//! }
//! ```

pub mod classify;
pub mod envelope;
pub mod error;
mod lenient;
pub mod model;
pub mod params;
pub mod reason;

// Re-exports for convenience
pub use envelope::Envelope;
pub use error::{PaymentError, PaymentResult};
pub use model::{ChargeOutcome, Required3DS, Transaction, TransactionStatus};
pub use params::Params;
pub use reason::{ReasonCode, UNRECOGNIZED_REASON_CODE};
