//! Custom error types for API operations

use thiserror::Error;

/// Transport-level failures raised by [`Client`](crate::core::client::Client)
#[derive(Error, Debug)]
pub enum TransportError {
    /// The API answered with a non-success status
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body of a successful response was not valid JSON
    #[error("Malformed response body from {url}: {message}")]
    Body {
        url: String,
        message: String,
    },
}

impl TransportError {
    /// HTTP status code, when the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            TransportError::Body { .. } => None,
        }
    }

    /// Check if error is a 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Library errors
#[derive(Error, Debug)]
pub enum Lingo24Error {
    /// Wrapped transport failure; the original error is kept as the source
    #[error("API error: {0}")]
    ApiError(#[source] TransportError),

    /// Two prices in different currencies were added together
    #[error("Cannot add prices with different currencies: {left} and {right}")]
    CurrencyMismatch {
        left: String,
        right: String,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },
}

impl Lingo24Error {
    /// HTTP status of the wrapped transport failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Lingo24Error::ApiError(e) => e.status(),
            _ => None,
        }
    }

    /// Check if error is a 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Lingo24Error::InvalidResponseError {
            message: message.into(),
        }
    }
}

impl From<TransportError> for Lingo24Error {
    /// An undecodable body is a malformed response, not a transport failure
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Body { url, message } => Lingo24Error::InvalidResponseError {
                message: format!("{}: {}", url, message),
            },
            other => Lingo24Error::ApiError(other),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, Lingo24Error>;
