//! # Orders
//!
//! Payment-link orders: the gateway hosts a payment page and emails or
//! texts the link to the payer.

use crate::client::CloudPaymentsClient;
use crate::paths;
use cloudpayments_core::{classify, Envelope, Params, PaymentResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// Order creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderRequest {
    pub amount: f64,
    pub currency: String,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Authorize only; capture later with `confirm_payment`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_confirmation: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_sms: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_redirect_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_redirect_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_data: Option<Value>,

    /// Any other field, serialized at the top level
    #[serde(flatten)]
    pub extra: Params,
}

impl OrderRequest {
    pub fn new(amount: f64, currency: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: description.into(),
            email: None,
            phone: None,
            invoice_id: None,
            account_id: None,
            require_confirmation: None,
            send_email: None,
            send_sms: None,
            success_redirect_url: None,
            fail_redirect_url: None,
            json_data: None,
            extra: Params::new(),
        }
    }

    /// Builder: send the payment link to this address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.send_email = Some(true);
        self
    }

    /// Builder: send the payment link by SMS
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self.send_sms = Some(true);
        self
    }

    pub fn with_invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_redirects(
        mut self,
        success_url: impl Into<String>,
        fail_url: impl Into<String>,
    ) -> Self {
        self.success_redirect_url = Some(success_url.into());
        self.fail_redirect_url = Some(fail_url.into());
        self
    }

    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = Some(true);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }
}

impl CloudPaymentsClient {
    /// Create a payment-link order.
    ///
    /// `order` is usually an `OrderRequest`, but any value serializing to a
    /// JSON object is accepted. Returns the full envelope; `Model.Url` holds
    /// the payment page.
    #[instrument(skip(self, order))]
    pub async fn create_order<T: Serialize + ?Sized>(&self, order: &T) -> PaymentResult<Envelope> {
        let params = Params::from_serialize(order)?;

        let envelope = self
            .dispatcher
            .send(paths::ORDERS_CREATE, params, &[])
            .await?;
        let envelope = classify::ensure_not_failed(envelope)?;

        info!("Order created");
        Ok(envelope)
    }

    /// Cancel an unpaid order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> PaymentResult<Envelope> {
        let params = Params::new().with("Id", id);

        let envelope = self
            .dispatcher
            .send(paths::ORDERS_CANCEL, params, &[])
            .await?;
        let envelope = classify::ensure_not_failed(envelope)?;

        info!("Order cancelled: id={}", id);
        Ok(envelope)
    }
}
