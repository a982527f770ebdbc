//! # Payment Error Types
//!
//! Typed error handling for the hosted cashier demo client.
//! All fallible operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for the payment workflow
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing or unparsable settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/HTTP error talking to the token endpoint
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Token endpoint answered with a non-success status
    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    /// Token response was missing a required field
    #[error("Token response missing required field: {field}")]
    MissingField { field: &'static str },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A payment attempt is already running for this screen
    #[error("A payment attempt is already in progress")]
    AttemptInProgress,

    /// Hosted checkout could not be started or did not report back
    #[error("Hosted checkout launch failed: {0}")]
    LaunchFailed(String),

    /// Unrecognised hosted checkout outcome
    #[error("Unknown payment outcome: {0}")]
    UnknownOutcome(String),

    /// Unrecognised payment action
    #[error("Unknown payment action: {0}")]
    UnknownAction(String),
}

impl PaymentError {
    /// Returns true if this error belongs to the token fetch step.
    ///
    /// All of these surface as the same generic notification.
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            PaymentError::NetworkError(_)
                | PaymentError::TokenEndpoint { .. }
                | PaymentError::MissingField { .. }
                | PaymentError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures() {
        assert!(PaymentError::NetworkError("timeout".into()).is_token_failure());
        assert!(PaymentError::TokenEndpoint {
            status: 500,
            body: "oops".into()
        }
        .is_token_failure());
        assert!(PaymentError::MissingField { field: "merchantId" }.is_token_failure());
        assert!(!PaymentError::AttemptInProgress.is_token_failure());
        assert!(!PaymentError::LaunchFailed("closed".into()).is_token_failure());
    }

    #[test]
    fn test_display() {
        let err = PaymentError::MissingField { field: "merchantId" };
        assert_eq!(
            err.to_string(),
            "Token response missing required field: merchantId"
        );
    }
}
