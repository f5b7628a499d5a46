//! # CloudPayments Client
//!
//! One async method per gateway capability. Each call builds its parameters,
//! performs exactly one round trip through the `Dispatcher`, and classifies
//! the envelope. Operations are grouped by resource in `payments`,
//! `receipts` and `orders`.

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::paths;
use crate::transport::HttpTransport;
use cloudpayments_core::{classify, Params, PaymentResult};
use std::sync::Arc;
use tracing::{info, instrument};

/// CloudPayments API client
///
/// Cheap to clone; clones share the HTTP connection pool. The configuration
/// is fixed at construction, use the `with_*` methods to derive a client with
/// different settings.
#[derive(Debug, Clone)]
pub struct CloudPaymentsClient {
    pub(crate) dispatcher: Dispatcher,
}

impl CloudPaymentsClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> PaymentResult<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client over a custom transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> PaymentResult<Self> {
        Ok(Self {
            dispatcher: Dispatcher::with_transport(config, transport)?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// A client with every setting replaced by `config`
    pub fn with_config(&self, config: ClientConfig) -> PaymentResult<Self> {
        Ok(Self {
            dispatcher: self.dispatcher.reconfigure(config)?,
        })
    }

    /// A client sending a different `CultureName`
    pub fn with_locale(&self, locale: impl Into<String>) -> PaymentResult<Self> {
        self.with_config(self.config().clone().with_locale(locale))
    }

    /// A client talking to a different endpoint
    pub fn with_base_url(&self, url: impl Into<String>) -> PaymentResult<Self> {
        self.with_config(self.config().clone().with_base_url(url))
    }

    /// A client authenticating with different API keys
    pub fn with_credentials(
        &self,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> PaymentResult<Self> {
        self.with_config(
            self.config()
                .clone()
                .with_credentials(public_key, private_key),
        )
    }

    /// Check connectivity and credentials.
    ///
    /// Only an explicit truthy `Success` counts; a missing flag is a failure.
    #[instrument(skip(self))]
    pub async fn test(&self) -> PaymentResult<()> {
        let envelope = self.dispatcher.send(paths::TEST, Params::new(), &[]).await?;
        classify::ensure_success(envelope)?;

        info!("Gateway connectivity check passed");
        Ok(())
    }
}
