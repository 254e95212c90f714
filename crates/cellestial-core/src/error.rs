//! # Gateway Error Types
//!
//! Typed error handling for the Cellestial backend.
//! Provider calls and request decoding all return `Result<T, GatewayError>`.

use thiserror::Error;

/// Message returned to clients when an upload request carries no file
pub const MISSING_UPLOAD_MESSAGE: &str = "No file uploaded";

/// Core error type for checkout and upload operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration errors (missing keys, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body could not be turned into a provider request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Multipart request without the expected file field
    #[error("{}", MISSING_UPLOAD_MESSAGE)]
    MissingUpload,

    /// Provider rejected the call (auth, validation, quota)
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with a provider
    #[error("Network error: {0}")]
    Network(String),

    /// Local filesystem error while staging an upload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Shorthand for a provider rejection
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        GatewayError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Only a missing upload is the client's fault; everything else,
    /// including an undecodable cart, is reported as a server failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MissingUpload => 400,
            _ => 500,
        }
    }

    /// Message exposed to API clients, without the variant prefix.
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::Configuration(msg)
            | GatewayError::InvalidRequest(msg)
            | GatewayError::Network(msg)
            | GatewayError::Serialization(msg)
            | GatewayError::Internal(msg) => msg.clone(),
            GatewayError::Provider { message, .. } => message.clone(),
            GatewayError::MissingUpload => MISSING_UPLOAD_MESSAGE.to_string(),
            GatewayError::Io(err) => err.to_string(),
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::MissingUpload.status_code(), 400);
        assert_eq!(
            GatewayError::InvalidRequest("items: invalid type".into()).status_code(),
            500
        );
        assert_eq!(
            GatewayError::provider("stripe", "No such price").status_code(),
            500
        );
        assert_eq!(GatewayError::Network("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_client_message_is_raw() {
        let err = GatewayError::provider("stripe", "Invalid API Key provided: sk_test_***");
        assert_eq!(err.client_message(), "Invalid API Key provided: sk_test_***");
        assert_eq!(
            err.to_string(),
            "Provider error [stripe]: Invalid API Key provided: sk_test_***"
        );
    }

    #[test]
    fn test_missing_upload_message() {
        assert_eq!(GatewayError::MissingUpload.client_message(), "No file uploaded");
        assert_eq!(GatewayError::MissingUpload.to_string(), "No file uploaded");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GatewayError = io.into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.client_message(), "gone");
    }
}
