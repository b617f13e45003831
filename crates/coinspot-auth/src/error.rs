//! Error types for authentication operations

/// Errors that can occur while preparing an authenticated request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request parameters could not be serialized into a JSON body
    #[error("Failed to serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
