//! Error types for REST API operations

use coinspot_auth::AuthError;

/// Message used when an error body carries no `message` field
pub const DEFAULT_ERROR_MESSAGE: &str = "No error message provided";

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The HTTP call failed or returned a non-2xx status
    ///
    /// `status` is `None` when no response was received at all.
    #[error("Transport error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Transport {
        /// HTTP status code, if a response arrived
        status: Option<u16>,
        /// Transport error text
        message: String,
    },

    /// The exchange answered with a `status` other than `"ok"`
    #[error("API error: status {status}: {message}")]
    Api {
        /// The body's `status` value
        status: String,
        /// The body's `message` value, or [`DEFAULT_ERROR_MESSAGE`]
        message: String,
    },

    /// A successful body did not match the expected response shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An authenticated operation was called on a client without credentials
    #[error("API key and secret are required for authenticated operations")]
    CredentialsRequired,

    /// The client could not be constructed
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// The request could not be signed
    #[error("Signing error: {0}")]
    Auth(#[from] AuthError),
}

impl RestError {
    /// Create an application error from a response body's status and message
    pub fn api(status: impl Into<String>, message: Option<String>) -> Self {
        Self::Api {
            status: status.into(),
            message: message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        }
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this error was reported by the exchange itself
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP status code of a transport error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
