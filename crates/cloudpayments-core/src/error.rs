//! # Payment Error Types
//!
//! Typed error handling for the CloudPayments client.
//! All gateway operations return `Result<T, PaymentError>`.

use crate::envelope::Envelope;
use crate::reason;
use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data supplied by the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The gateway did not accept the call as a valid operation
    #[error("Request failed: {}", message_or_default(.message))]
    RequestFailed {
        message: Option<String>,
        envelope: Envelope,
    },

    /// The request was processed but the payment itself was declined
    #[error("Payment declined: {}", declined_description(.reason_code))]
    PaymentDeclined {
        reason_code: i64,
        message: Option<String>,
        envelope: Envelope,
    },

    /// Network, TLS or timeout failure talking to the gateway
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway answered with a body that is not a JSON object
    #[error("Invalid response (HTTP {status}): {body}")]
    InvalidResponse { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Request failure carrying the full response envelope.
    pub fn request_failed(envelope: Envelope) -> Self {
        PaymentError::RequestFailed {
            message: envelope.message().map(String::from),
            envelope,
        }
    }

    /// Domain-level decline carrying the reason code and envelope.
    pub fn payment_declined(reason_code: i64, envelope: Envelope) -> Self {
        PaymentError::PaymentDeclined {
            reason_code,
            message: envelope.message().map(String::from),
            envelope,
        }
    }

    /// The response envelope, for gateway-level failures
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            PaymentError::RequestFailed { envelope, .. }
            | PaymentError::PaymentDeclined { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// Gateway message, if one was returned
    pub fn message(&self) -> Option<&str> {
        match self {
            PaymentError::RequestFailed { message, .. }
            | PaymentError::PaymentDeclined { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Decline reason code (only for `PaymentDeclined`)
    pub fn reason_code(&self) -> Option<i64> {
        match self {
            PaymentError::PaymentDeclined { reason_code, .. } => Some(*reason_code),
            _ => None,
        }
    }

    /// Returns true if the payment reached the issuer and was refused
    pub fn is_declined(&self) -> bool {
        matches!(self, PaymentError::PaymentDeclined { .. })
    }

    /// Returns true if the gateway could not be reached or understood
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PaymentError::Transport(_) | PaymentError::InvalidResponse { .. }
        )
    }
}

fn message_or_default(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("gateway returned no message")
}

fn declined_description(reason_code: &i64) -> String {
    reason::describe(*reason_code)
}

/// Result type alias for gateway operations
pub type PaymentResult<T> = Result<T, PaymentError>;
