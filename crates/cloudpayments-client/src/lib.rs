//! # cloudpayments-client
//!
//! Async client for the CloudPayments REST gateway.
//!
//! Every operation is one authenticated JSON POST. The reply is classified
//! into a typed result or one of two gateway errors:
//!
//! - `PaymentError::RequestFailed` - the gateway did not accept the call
//! - `PaymentError::PaymentDeclined` - the call was valid, the payment was refused
//!
//! Network failures and non-JSON replies surface separately as
//! `PaymentError::Transport` and `PaymentError::InvalidResponse`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudpayments_client::{CardCharge, CloudPaymentsClient, ClientConfig};
//! use cloudpayments_core::ChargeOutcome;
//!
//! let client = CloudPaymentsClient::new(ClientConfig::new("pk_...", "secret"))?;
//!
//! let charge = CardCharge::new(100.0, "RUB", "203.0.113.7", "J DOE", cryptogram)
//!     .with_invoice_id("order-1234");
//!
//! match client.charge_card(charge).await? {
//!     ChargeOutcome::Completed(tx) => println!("paid: {:?}", tx.transaction_id),
//!     ChargeOutcome::Requires3ds(challenge) => {
//!         // Redirect the payer to challenge.acs_url with challenge.pa_req,
//!         // then finish with client.confirm_3ds(id, pa_res).
//!     }
//! }
//! ```
//!
//! ## Derived clients
//!
//! ```rust,ignore
//! // Same connection pool, Russian-language gateway messages
//! let ru = client.with_locale("ru-RU")?;
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod orders;
pub mod paths;
pub mod payments;
pub mod receipts;
pub mod transport;

// Re-exports
pub use client::CloudPaymentsClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_LOCALE, DEFAULT_TIMEOUT_SECS};
pub use dispatcher::Dispatcher;
pub use orders::OrderRequest;
pub use payments::{CardCharge, TokenCharge};
pub use receipts::REQUEST_ID_HEADER;
pub use transport::{GatewayRequest, HttpTransport, RawResponse, ReqwestTransport};
