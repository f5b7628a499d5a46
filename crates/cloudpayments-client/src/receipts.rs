//! # Fiscal Receipts
//!
//! Online cash register (KKT) receipt issuance and lookup. The receipt body
//! is passed through as given; the full envelope comes back to the caller.

use crate::client::CloudPaymentsClient;
use crate::paths;
use cloudpayments_core::{classify, Envelope, Params, PaymentError, PaymentResult};
use reqwest::header::HeaderValue;
use serde::Serialize;
use tracing::{info, instrument};

/// Header carrying the caller's request id on receipt issuance
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

impl CloudPaymentsClient {
    /// Issue a fiscal receipt.
    ///
    /// `receipt` must serialize to a JSON object. When `request_id` is given
    /// it is sent as `X-Request-ID` so the gateway can reject duplicates; an id
    /// that cannot be a header value fails with `InvalidRequest` before sending.
    /// Fails unless the gateway reports an explicit `Success`.
    #[instrument(skip(self, receipt))]
    pub async fn create_receipt<T: Serialize + ?Sized>(
        &self,
        receipt: &T,
        request_id: Option<&str>,
    ) -> PaymentResult<Envelope> {
        let params = Params::from_serialize(receipt)?;

        if let Some(id) = request_id {
            HeaderValue::from_str(id).map_err(|_| {
                PaymentError::InvalidRequest(format!(
                    "{} is not a valid header value",
                    REQUEST_ID_HEADER
                ))
            })?;
        }

        let headers: Vec<(&str, &str)> = request_id
            .map(|id| vec![(REQUEST_ID_HEADER, id)])
            .unwrap_or_default();

        let envelope = self
            .dispatcher
            .send(paths::RECEIPT, params, &headers)
            .await?;
        let envelope = classify::ensure_success(envelope)?;

        info!("Receipt queued");
        Ok(envelope)
    }

    /// Fetch a previously issued receipt by id
    #[instrument(skip(self))]
    pub async fn get_receipt(&self, id: &str) -> PaymentResult<Envelope> {
        let params = Params::new().with("Id", id);

        let envelope = self
            .dispatcher
            .send(paths::RECEIPT_GET, params, &[])
            .await?;
        classify::ensure_success(envelope)
    }
}
