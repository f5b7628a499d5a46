//! # Gateway Configuration
//!
//! Endpoint, credentials and locale for the CloudPayments API.
//! A config is an immutable value: build it once, hand it to a client, and
//! derive variants through the `with_*` builders instead of mutating it.

use cloudpayments_core::{PaymentError, PaymentResult};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_API_URL: &str = "https://api.cloudpayments.ru";

/// Locale sent as `CultureName` when none is configured
pub const DEFAULT_LOCALE: &str = "en-US";

/// Total timeout for one gateway call
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// CloudPayments API configuration
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Public ID, sent as the basic-auth user
    pub public_key: String,

    /// API secret, sent as the basic-auth password
    pub private_key: String,

    /// API base URL (for testing/mocking)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Locale tag sent as `CultureName`
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create config with explicit credentials and default endpoint/locale
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_url: default_base_url(),
            locale: default_locale(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CLOUDPAYMENTS_PUBLIC_KEY`
    /// - `CLOUDPAYMENTS_PRIVATE_KEY`
    ///
    /// Optional: `CLOUDPAYMENTS_API_URL`, `CLOUDPAYMENTS_LOCALE`.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let public_key = env::var("CLOUDPAYMENTS_PUBLIC_KEY").map_err(|_| {
            PaymentError::Configuration("CLOUDPAYMENTS_PUBLIC_KEY not set".to_string())
        })?;

        let private_key = env::var("CLOUDPAYMENTS_PRIVATE_KEY").map_err(|_| {
            PaymentError::Configuration("CLOUDPAYMENTS_PRIVATE_KEY not set".to_string())
        })?;

        let mut config = Self::new(public_key, private_key);

        if let Ok(url) = env::var("CLOUDPAYMENTS_API_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(locale) = env::var("CLOUDPAYMENTS_LOCALE") {
            config = config.with_locale(locale);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> PaymentResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PaymentResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaymentError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that the config can be used to reach the gateway
    pub fn validate(&self) -> PaymentResult<()> {
        if self.public_key.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "public key must not be empty".to_string(),
            ));
        }

        if self.private_key.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "private key must not be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PaymentError::Configuration(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        if self.locale.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "locale must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(PaymentError::Configuration(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL for an API path such as `/payments/find`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set the locale sent with every request
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Builder: replace both API keys
    pub fn with_credentials(
        mut self,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.public_key = public_key.into();
        self.private_key = private_key.into();
        self
    }

    /// Builder: set the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }
}

// Keeps the API secret out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("locale", &self.locale)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("pk_test", "secret");

        assert_eq!(config.base_url, "https://api.cloudpayments.ru");
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_return_new_values() {
        let base = ClientConfig::new("pk_test", "secret");
        let custom = base
            .clone()
            .with_base_url("http://localhost:9000/")
            .with_locale("ru-RU");

        assert_eq!(base.locale, "en-US");
        assert_eq!(custom.locale, "ru-RU");
        assert_eq!(custom.endpoint("/test"), "http://localhost:9000/test");
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("", "secret").validate().is_err());
        assert!(ClientConfig::new("pk", " ").validate().is_err());
        assert!(ClientConfig::new("pk", "secret")
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::new("pk", "secret")
            .with_locale("")
            .validate()
            .is_err());
        assert!(ClientConfig::new("pk", "secret")
            .with_timeout(Duration::from_millis(10))
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = ClientConfig::new("pk_test", "super-secret");
        let debug = format!("{:?}", config);

        assert!(debug.contains("pk_test"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            public_key = "pk_test"
            private_key = "secret"
            locale = "ru-RU"
            "#,
        )
        .unwrap();

        assert_eq!(config.locale, "ru-RU");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let err = ClientConfig::from_toml_str("public_key = \"pk\"").unwrap_err();
        assert!(matches!(err, PaymentError::Configuration(_)));
    }

    #[test]
    fn test_from_env() {
        env::remove_var("CLOUDPAYMENTS_PUBLIC_KEY");
        env::remove_var("CLOUDPAYMENTS_PRIVATE_KEY");
        assert!(ClientConfig::from_env().is_err());

        env::set_var("CLOUDPAYMENTS_PUBLIC_KEY", "pk_env");
        env::set_var("CLOUDPAYMENTS_PRIVATE_KEY", "secret_env");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.public_key, "pk_env");
        assert_eq!(config.private_key, "secret_env");

        env::remove_var("CLOUDPAYMENTS_PUBLIC_KEY");
        env::remove_var("CLOUDPAYMENTS_PRIVATE_KEY");
    }
}
