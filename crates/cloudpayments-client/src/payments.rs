//! # Payments
//!
//! Card and token charges, 3-D Secure confirmation, two-stage confirm/void,
//! refunds, lookups and SBP payment links.

use crate::client::CloudPaymentsClient;
use crate::paths;
use chrono::{Local, NaiveDate};
use cloudpayments_core::{
    classify, ChargeOutcome, Envelope, Params, PaymentResult, Transaction,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Date format expected by the payment list endpoint
const LIST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Charge by card cryptogram
#[derive(Debug, Clone)]
pub struct CardCharge {
    pub amount: f64,
    pub currency: String,
    pub ip_address: String,
    pub card_holder_name: String,
    /// Encrypted card data produced by the checkout script
    pub cryptogram: String,
    pub invoice_id: Option<String>,
    pub description: Option<String>,
    pub account_id: Option<String>,
    pub email: Option<String>,
    pub json_data: Option<Value>,
    /// Authorize only; the payment must later be confirmed or voided
    pub require_confirmation: bool,
    /// Additional fields, merged over everything above
    pub extra: Params,
}

impl CardCharge {
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        ip_address: impl Into<String>,
        card_holder_name: impl Into<String>,
        cryptogram: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            ip_address: ip_address.into(),
            card_holder_name: card_holder_name.into(),
            cryptogram: cryptogram.into(),
            invoice_id: None,
            description: None,
            account_id: None,
            email: None,
            json_data: None,
            require_confirmation: false,
            extra: Params::new(),
        }
    }

    pub fn with_invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_json_data(mut self, data: Value) -> Self {
        self.json_data = Some(data);
        self
    }

    /// Builder: add one extra field
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Builder: merge extra fields
    pub fn with_params(mut self, params: Params) -> Self {
        self.extra = self.extra.merge(params);
        self
    }

    /// Builder: authorize only (two-stage payment)
    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    fn path(&self) -> &'static str {
        if self.require_confirmation {
            paths::CARDS_AUTH
        } else {
            paths::CARDS_CHARGE
        }
    }

    fn into_params(self) -> Params {
        Params::new()
            .with("Amount", self.amount)
            .with("Currency", self.currency)
            .with("IpAddress", self.ip_address)
            .with("Name", self.card_holder_name)
            .with("CardCryptogramPacket", self.cryptogram)
            .with_opt("InvoiceId", self.invoice_id)
            .with_opt("Description", self.description)
            .with_opt("AccountId", self.account_id)
            .with_opt("Email", self.email)
            .with_opt("JsonData", self.json_data)
            .merge(self.extra)
    }
}

/// Charge by a token saved from an earlier card payment
#[derive(Debug, Clone)]
pub struct TokenCharge {
    pub amount: f64,
    pub currency: String,
    /// Payer id the token was issued for
    pub account_id: String,
    pub token: String,
    pub invoice_id: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub json_data: Option<Value>,
    pub require_confirmation: bool,
    pub extra: Params,
}

impl TokenCharge {
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        account_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            account_id: account_id.into(),
            token: token.into(),
            invoice_id: None,
            description: None,
            email: None,
            ip_address: None,
            json_data: None,
            require_confirmation: false,
            extra: Params::new(),
        }
    }

    pub fn with_invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_json_data(mut self, data: Value) -> Self {
        self.json_data = Some(data);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.extra = self.extra.merge(params);
        self
    }

    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    fn path(&self) -> &'static str {
        if self.require_confirmation {
            paths::TOKENS_AUTH
        } else {
            paths::TOKENS_CHARGE
        }
    }

    fn into_params(self) -> Params {
        Params::new()
            .with("Amount", self.amount)
            .with("Currency", self.currency)
            .with("AccountId", self.account_id)
            .with("Token", self.token)
            .with_opt("InvoiceId", self.invoice_id)
            .with_opt("Description", self.description)
            .with_opt("Email", self.email)
            .with_opt("IpAddress", self.ip_address)
            .with_opt("JsonData", self.json_data)
            .merge(self.extra)
    }
}

impl CloudPaymentsClient {
    /// Charge (or authorize) a card.
    ///
    /// Returns the completed transaction or a 3-D Secure challenge. A gateway
    /// message fails with `RequestFailed`, a nonzero reason code with
    /// `PaymentDeclined`.
    #[instrument(skip(self, charge), fields(amount = charge.amount, currency = %charge.currency))]
    pub async fn charge_card(&self, charge: CardCharge) -> PaymentResult<ChargeOutcome> {
        let path = charge.path();
        let envelope = self.dispatcher.send(path, charge.into_params(), &[]).await?;
        let outcome = log_charge(classify::classify_charge(envelope))?;
        Ok(outcome)
    }

    /// Charge (or authorize) a saved card token. Same outcomes as `charge_card`.
    #[instrument(skip(self, charge), fields(amount = charge.amount, currency = %charge.currency))]
    pub async fn charge_token(&self, charge: TokenCharge) -> PaymentResult<ChargeOutcome> {
        let path = charge.path();
        let envelope = self.dispatcher.send(path, charge.into_params(), &[]).await?;
        let outcome = log_charge(classify::classify_charge(envelope))?;
        Ok(outcome)
    }

    /// Complete a charge after the payer passed 3-D Secure.
    ///
    /// `pa_res` is the `PaRes` value posted back by the issuer's ACS.
    #[instrument(skip(self, pa_res))]
    pub async fn confirm_3ds(&self, transaction_id: i64, pa_res: &str) -> PaymentResult<Transaction> {
        let params = Params::new()
            .with("TransactionId", transaction_id)
            .with("PaRes", pa_res);

        let envelope = self
            .dispatcher
            .send(paths::CARDS_POST_3DS, params, &[])
            .await?;

        let transaction = classify::classify_3ds_confirmation(envelope).map_err(|e| {
            warn!("3-D Secure confirmation failed: {}", e);
            e
        })?;

        info!("3-D Secure confirmed: transaction_id={}", transaction_id);
        Ok(transaction)
    }

    /// Capture a two-stage payment previously authorized
    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, transaction_id: i64, amount: f64) -> PaymentResult<()> {
        let params = Params::new()
            .with("TransactionId", transaction_id)
            .with("Amount", amount);

        let envelope = self.dispatcher.send(paths::CONFIRM, params, &[]).await?;
        classify::ensure_not_failed(envelope)?;

        info!("Payment confirmed: transaction_id={}", transaction_id);
        Ok(())
    }

    /// Cancel an authorized payment
    #[instrument(skip(self))]
    pub async fn void_payment(&self, transaction_id: i64) -> PaymentResult<()> {
        let params = Params::new().with("TransactionId", transaction_id);

        let envelope = self.dispatcher.send(paths::VOID, params, &[]).await?;
        classify::ensure_not_failed(envelope)?;

        info!("Payment voided: transaction_id={}", transaction_id);
        Ok(())
    }

    /// Refund a completed payment, fully or partially.
    ///
    /// `extra` may add fields (e.g. `JsonData`); `TransactionId` and `Amount`
    /// always come from the arguments.
    #[instrument(skip(self, extra))]
    pub async fn refund_payment(
        &self,
        transaction_id: i64,
        amount: f64,
        extra: Params,
    ) -> PaymentResult<()> {
        let mut params = Params::new()
            .with("TransactionId", transaction_id)
            .with("Amount", amount)
            .merge(extra);
        params.insert("TransactionId", transaction_id);
        params.insert("Amount", amount);

        let envelope = self.dispatcher.send(paths::REFUND, params, &[]).await?;
        classify::ensure_not_failed(envelope)?;

        info!("Payment refunded: transaction_id={}, amount={}", transaction_id, amount);
        Ok(())
    }

    /// Look up a payment by the merchant's invoice id
    #[instrument(skip(self))]
    pub async fn find_payment(&self, invoice_id: &str) -> PaymentResult<Transaction> {
        let params = Params::new().with("InvoiceId", invoice_id);

        let envelope = self.dispatcher.send(paths::FIND, params, &[]).await?;
        classify::transaction_unless_failed(envelope)
    }

    /// List payments for a day. Defaults to today when no date is given.
    #[instrument(skip(self))]
    pub async fn list_payments(
        &self,
        date: Option<NaiveDate>,
        timezone: Option<&str>,
    ) -> PaymentResult<Vec<Transaction>> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let params = Params::new()
            .with("Date", date.format(LIST_DATE_FORMAT).to_string())
            .with_opt("TimeZone", timezone);

        let envelope = self.dispatcher.send(paths::LIST, params, &[]).await?;
        let transactions = classify::transactions_unless_failed(envelope)?;

        info!("Listed {} payments for {}", transactions.len(), date);
        Ok(transactions)
    }

    /// Create an SBP (QR instant payment) link.
    ///
    /// The envelope is returned as-is, even when the gateway reports failure.
    #[instrument(skip(self, extra))]
    pub async fn create_sbp_link(
        &self,
        amount: f64,
        currency: &str,
        account_id: &str,
        extra: Params,
    ) -> PaymentResult<Envelope> {
        let params = Params::new()
            .with("Amount", amount)
            .with("Currency", currency)
            .with("AccountId", account_id)
            .merge(extra);

        self.dispatcher.send(paths::SBP_LINK, params, &[]).await
    }
}

fn log_charge(result: PaymentResult<ChargeOutcome>) -> PaymentResult<ChargeOutcome> {
    match &result {
        Ok(ChargeOutcome::Completed(tx)) => {
            info!("Charge completed: transaction_id={:?}", tx.transaction_id);
        }
        Ok(ChargeOutcome::Requires3ds(challenge)) => {
            warn!(
                "Charge requires 3-D Secure: transaction_id={:?}",
                challenge.transaction_id
            );
        }
        Err(e) => {
            warn!("Charge failed: {}", e);
        }
    }
    result
}
