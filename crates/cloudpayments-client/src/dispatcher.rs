//! # Request Dispatcher
//!
//! Turns `(path, params, headers)` into one authenticated JSON POST and
//! decodes the reply into an `Envelope`. No retries, no classification.

use crate::config::ClientConfig;
use crate::transport::{GatewayRequest, HttpTransport, ReqwestTransport};
use cloudpayments_core::{Envelope, Params, PaymentError, PaymentResult};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Parameter key carrying the configured locale
pub const CULTURE_NAME_KEY: &str = "CultureName";

/// Longest body excerpt kept in `InvalidResponse`
const BODY_EXCERPT_LEN: usize = 512;

/// Sends requests for one immutable configuration
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl Dispatcher {
    /// Create a dispatcher backed by `reqwest`
    pub fn new(config: ClientConfig) -> PaymentResult<Self> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a dispatcher over a custom transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> PaymentResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Same transport, different configuration
    pub fn reconfigure(&self, config: ClientConfig) -> PaymentResult<Self> {
        Self::with_transport(config, Arc::clone(&self.transport))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `params` to `path` and decode the JSON object reply.
    ///
    /// The locale is always written to `CultureName`, replacing any caller value.
    #[instrument(skip(self, params, headers), fields(locale = %self.config.locale))]
    pub async fn send(
        &self,
        path: &str,
        mut params: Params,
        headers: &[(&str, &str)],
    ) -> PaymentResult<Envelope> {
        params.insert(CULTURE_NAME_KEY, self.config.locale.clone());

        let body = serde_json::to_string(&params)
            .map_err(|e| PaymentError::Serialization(format!("Failed to encode request: {}", e)))?;

        let request = GatewayRequest {
            url: self.config.endpoint(path),
            username: self.config.public_key.clone(),
            password: self.config.private_key.clone(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
            timeout: self.config.timeout(),
        };

        debug!("Dispatching gateway request: {} fields", params.len());

        let response = self.transport.post(request).await?;

        debug!("Gateway responded: status={}", response.status);

        decode_envelope(response.status, &response.body)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("transport", &"<transport>")
            .finish()
    }
}

/// Decode a body that must be a JSON object, whatever the HTTP status.
fn decode_envelope(status: u16, body: &str) -> PaymentResult<Envelope> {
    let decoded = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(Envelope::from_value);

    match decoded {
        Some(envelope) => Ok(envelope),
        None => {
            error!("Undecodable gateway response: status={}", status);
            Err(PaymentError::InvalidResponse {
                status,
                body: body.chars().take(BODY_EXCERPT_LEN).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct StubTransport {
        response: RawResponse,
        seen: Mutex<Vec<GatewayRequest>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: RawResponse {
                    status,
                    body: body.to_string(),
                },
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> GatewayRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn post(&self, request: GatewayRequest) -> PaymentResult<RawResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("pk_test", "secret").with_base_url("http://gateway.local")
    }

    #[tokio::test]
    async fn test_send_builds_authenticated_request() {
        let stub = StubTransport::replying(200, r#"{"Success": true}"#);
        let dispatcher = Dispatcher::with_transport(config(), stub.clone()).unwrap();

        let envelope = dispatcher
            .send(
                "/payments/void",
                Params::new().with("TransactionId", 42),
                &[("X-Request-ID", "req-1")],
            )
            .await
            .unwrap();

        assert!(envelope.is_success());

        let request = stub.last();
        assert_eq!(request.url, "http://gateway.local/payments/void");
        assert_eq!(request.username, "pk_test");
        assert_eq!(request.password, "secret");
        assert_eq!(
            request.headers,
            vec![("X-Request-ID".to_string(), "req-1".to_string())]
        );
        assert_eq!(request.timeout.as_secs(), 20);

        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, json!({"TransactionId": 42, "CultureName": "en-US"}));
    }

    #[tokio::test]
    async fn test_locale_overrides_caller_culture_name() {
        let stub = StubTransport::replying(200, "{}");
        let dispatcher =
            Dispatcher::with_transport(config().with_locale("ru-RU"), stub.clone()).unwrap();

        dispatcher
            .send("/test", Params::new().with("CultureName", "de-DE"), &[])
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&stub.last().body).unwrap();
        assert_eq!(body["CultureName"], "ru-RU");
    }

    #[tokio::test]
    async fn test_non_object_body_is_invalid_response() {
        let stub = StubTransport::replying(502, "<html>Bad Gateway</html>");
        let dispatcher = Dispatcher::with_transport(config(), stub).unwrap();

        let err = dispatcher.send("/test", Params::new(), &[]).await.unwrap_err();

        match err {
            PaymentError::InvalidResponse { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_array_body_is_invalid_response() {
        let stub = StubTransport::replying(200, "[1, 2, 3]");
        let dispatcher = Dispatcher::with_transport(config(), stub).unwrap();

        let err = dispatcher.send("/test", Params::new(), &[]).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_decoded() {
        let stub = StubTransport::replying(400, r#"{"Success": false, "Message": "Bad"}"#);
        let dispatcher = Dispatcher::with_transport(config(), stub).unwrap();

        let envelope = dispatcher.send("/test", Params::new(), &[]).await.unwrap();
        assert_eq!(envelope.message(), Some("Bad"));
    }

    #[tokio::test]
    async fn test_reconfigure_shares_transport() {
        let stub = StubTransport::replying(200, "{}");
        let dispatcher = Dispatcher::with_transport(config(), stub.clone()).unwrap();
        let other = dispatcher
            .reconfigure(config().with_base_url("http://other.local"))
            .unwrap();

        other.send("/test", Params::new(), &[]).await.unwrap();

        assert_eq!(stub.last().url, "http://other.local/test");
        assert_eq!(dispatcher.config().base_url, "http://gateway.local");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let stub = StubTransport::replying(200, "{}");
        let result = Dispatcher::with_transport(ClientConfig::new("", "secret"), stub);
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }
}
