//! Marketplace API error types.

use thiserror::Error;

/// Failure of a call against the marketplace API or its token store.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("token rejected by API: {message}")]
    Unauthorized { message: String },

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("failed to decode API response: {message}")]
    Decode { message: String },

    #[error("secure storage error: {0}")]
    Secret(#[from] super::SecretError),

    #[error("unexpected API error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates rejection carrying the server-provided message.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Message the server attached to a rejection, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Unauthorized { message }
                if !message.is_empty() =>
            {
                Some(message)
            }
            _ => None,
        }
    }

    /// Returns whether error means the credentials are not valid.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_from_rejection() {
        let err = ApiError::rejected(400, "Invalid credentials");
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert_eq!(
            err.to_string(),
            "request rejected (400): Invalid credentials"
        );
    }

    #[test]
    fn test_no_server_message_for_transport_errors() {
        assert_eq!(ApiError::network("connection refused").server_message(), None);
        assert_eq!(ApiError::rejected(500, "").server_message(), None);
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::unauthorized("expired").is_auth_failure());
        assert!(!ApiError::decode("bad json").is_auth_failure());
        assert!(!ApiError::network("timeout").is_auth_failure());
        assert!(ApiError::network("timeout").is_network_error());
    }

    #[test]
    fn test_secret_error_converts() {
        let err: ApiError = super::super::SecretError::NotAvailable("no dbus".into()).into();
        assert!(matches!(err, ApiError::Secret(_)));
    }
}
