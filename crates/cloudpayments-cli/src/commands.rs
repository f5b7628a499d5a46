//! # CLI Commands
//!
//! Argument definitions and the mapping from each subcommand to one client
//! operation.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cloudpayments_client::{ClientConfig, CloudPaymentsClient};
use cloudpayments_core::{Params, PaymentError, PaymentResult};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cloudpayments", version, about = "CloudPayments gateway operator CLI")]
pub struct Cli {
    /// TOML config file. Falls back to CLOUDPAYMENTS_* environment variables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Locale sent as CultureName, e.g. ru-RU
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Check connectivity and credentials
    Test,
    /// Look up a payment by invoice id
    Find { invoice_id: String },
    /// List payments for a day (defaults to today)
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Capture an authorized payment
    Confirm { transaction_id: i64, amount: f64 },
    /// Cancel an authorized payment
    Void { transaction_id: i64 },
    /// Refund a completed payment
    Refund { transaction_id: i64, amount: f64 },
    /// Fetch a fiscal receipt
    Receipt { id: String },
    /// Cancel an unpaid order
    CancelOrder { id: String },
}

impl Cli {
    /// Resolve the client configuration from `--config` or the environment
    pub fn load_config(&self) -> anyhow::Result<ClientConfig> {
        let config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::from_env()?,
        };

        Ok(match &self.locale {
            Some(locale) => config.with_locale(locale.clone()),
            None => config,
        })
    }
}

/// Run one command and return what should be printed
pub async fn execute(command: &Command, client: &CloudPaymentsClient) -> PaymentResult<Value> {
    let output = match command {
        Command::Test => {
            client.test().await?;
            json!({"Success": true})
        }
        Command::Find { invoice_id } => to_json(&client.find_payment(invoice_id).await?)?,
        Command::List { date, timezone } => {
            to_json(&client.list_payments(*date, timezone.as_deref()).await?)?
        }
        Command::Confirm {
            transaction_id,
            amount,
        } => {
            client.confirm_payment(*transaction_id, *amount).await?;
            json!({"Success": true, "TransactionId": transaction_id})
        }
        Command::Void { transaction_id } => {
            client.void_payment(*transaction_id).await?;
            json!({"Success": true, "TransactionId": transaction_id})
        }
        Command::Refund {
            transaction_id,
            amount,
        } => {
            client
                .refund_payment(*transaction_id, *amount, Params::new())
                .await?;
            json!({"Success": true, "TransactionId": transaction_id, "Amount": amount})
        }
        Command::Receipt { id } => client.get_receipt(id).await?.into_value(),
        Command::CancelOrder { id } => client.cancel_order(id).await?.into_value(),
    };

    Ok(output)
}

fn to_json<T: serde::Serialize>(value: &T) -> PaymentResult<Value> {
    serde_json::to_value(value).map_err(|e| PaymentError::Serialization(e.to_string()))
}
