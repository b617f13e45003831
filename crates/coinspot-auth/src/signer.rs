//! Request signing
//!
//! CoinSpot's signing scheme:
//! 1. Add a `nonce` field to the request parameters
//! 2. Serialize the result to compact JSON
//! 3. HMAC-SHA512 over those bytes, keyed with the API secret
//! 4. Hex encode (lowercase) and send as the `sign` header
//!
//! The serialized string is the request body. It is produced exactly once and
//! never re-encoded, so the signed bytes and the sent bytes cannot drift.

use serde::Serialize;
use std::sync::Arc;
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::AuthResult;
use crate::nonce::NonceGenerator;

/// Parameters with the nonce injected in front
#[derive(Serialize)]
struct NoncedPayload<'a, P: Serialize + ?Sized> {
    nonce: u64,
    #[serde(flatten)]
    params: &'a P,
}

/// A request body together with its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Nonce embedded in `body`
    pub nonce: u64,
    /// Compact JSON body, to be sent verbatim
    pub body: String,
    /// Lowercase hex HMAC-SHA512 of `body`
    pub signature: String,
}

/// Signs request parameters with one set of credentials
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    nonces: Arc<NonceGenerator>,
}

impl RequestSigner {
    /// Create a signer drawing nonces from [`NonceGenerator::global`]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_nonces(credentials, NonceGenerator::global())
    }

    /// Create a signer drawing nonces from `nonces`
    ///
    /// Signers built from the same credentials must share one generator.
    pub fn with_nonces(credentials: Credentials, nonces: Arc<NonceGenerator>) -> Self {
        Self { credentials, nonces }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign `params` with a freshly issued nonce
    ///
    /// `params` must serialize to a JSON object (a struct or map).
    pub fn sign<P: Serialize + ?Sized>(&self, params: &P) -> AuthResult<SignedPayload> {
        self.sign_with_nonce(self.nonces.next(), params)
    }

    /// Sign `params` with an explicit nonce
    pub fn sign_with_nonce<P: Serialize + ?Sized>(
        &self,
        nonce: u64,
        params: &P,
    ) -> AuthResult<SignedPayload> {
        let body = serde_json::to_string(&NoncedPayload { nonce, params })?;
        let signature = self.credentials.sign(&body)?;

        trace!(nonce, len = body.len(), "Signed request payload");

        Ok(SignedPayload {
            nonce,
            body,
            signature,
        })
    }
}
