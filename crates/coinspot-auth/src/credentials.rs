//! API credentials for CoinSpot's private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "COINSPOT_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "COINSPOT_API_SECRET";

/// API key and secret for signed requests
///
/// Both halves are guaranteed non-empty; a client without usable credentials
/// simply holds no `Credentials` at all.
pub struct Credentials {
    /// API key (sent in the `key` header)
    api_key: String,
    /// API secret (HMAC key, zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if either value is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Build credentials from an optional key and secret
    ///
    /// Returns `None` unless both are present and non-empty.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Option<Self> {
        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Self::new(key, secret).ok(),
            _ => None,
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINSPOT_API_KEY` and `COINSPOT_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// HMAC-SHA512 of `message` keyed with the API secret, lowercase hex
    pub fn sign(&self, message: &str) -> AuthResult<String> {
        let mut mac = HmacSha512::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
        mac.update(message.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
