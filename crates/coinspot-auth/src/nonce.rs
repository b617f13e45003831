//! Strictly increasing request nonces
//!
//! CoinSpot rejects any signed request whose nonce is not greater than the
//! previous one seen for the same key. Wall-clock milliseconds are used as the
//! base, but two requests in the same millisecond (or a clock step backwards)
//! would collide, so every issued nonce is also at least one more than the
//! last.

use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

static GLOBAL: OnceLock<Arc<NonceGenerator>> = OnceLock::new();

/// Nonce source shared by every signer that uses the same credentials
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: Mutex<u64>,
}

impl NonceGenerator {
    /// Create a generator that has not issued any nonce yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide generator
    ///
    /// Every signer built with [`RequestSigner::new`](crate::RequestSigner::new)
    /// draws from this one, so clients built from cloned credentials never
    /// reuse a nonce.
    pub fn global() -> Arc<Self> {
        GLOBAL.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Issue the next nonce: `max(now_ms, last + 1)`
    pub fn next(&self) -> u64 {
        let mut last = self.last.lock();
        let nonce = now_millis().max(last.saturating_add(1));
        *last = nonce;
        nonce
    }

    /// The most recently issued nonce, or 0 if none was issued
    pub fn last(&self) -> u64 {
        *self.last.lock()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
