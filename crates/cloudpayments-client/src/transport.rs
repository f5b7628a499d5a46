//! # HTTP Transport
//!
//! The black-box "send a POST, get status and body" seam under the dispatcher.
//! `ReqwestTransport` is the production implementation; tests can plug in
//! their own.

use async_trait::async_trait;
use cloudpayments_core::{PaymentError, PaymentResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::error;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// One authenticated JSON POST to the gateway
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub url: String,
    /// Basic-auth user
    pub username: String,
    /// Basic-auth password
    pub password: String,
    /// Extra headers, sent in addition to `Content-Type`
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: String,
    pub timeout: Duration,
}

/// Status and raw body of a gateway response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a single request. Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: GatewayRequest) -> PaymentResult<RawResponse>;
}

/// `reqwest`-backed transport. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport that follows redirects
    pub fn new() -> PaymentResult<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: GatewayRequest) -> PaymentResult<RawResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .basic_auth(&request.username, Some(&request.password))
            .header(CONTENT_TYPE, "application/json")
            .timeout(request.timeout)
            .body(request.body);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            error!("Gateway request failed: url={}, error={}", request.url, e);
            transport_error(e, request.timeout)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, request.timeout))?;

        Ok(RawResponse { status, body })
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> PaymentError {
    if e.is_timeout() {
        PaymentError::Transport(format!("request timed out after {}s", timeout.as_secs()))
    } else {
        PaymentError::Transport(e.to_string())
    }
}
