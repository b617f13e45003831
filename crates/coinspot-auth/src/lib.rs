//! Authentication primitives for CoinSpot's private REST API
//!
//! This crate owns everything needed to turn a set of request parameters into
//! a signed CoinSpot request body: API credentials, a strictly increasing
//! nonce source, and HMAC-SHA512 signing over the exact bytes that are sent.
//!
//! # Example
//!
//! ```no_run
//! use coinspot_auth::{Credentials, RequestSigner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let signer = RequestSigner::new(creds);
//!
//! #[derive(serde::Serialize)]
//! struct Params<'a> {
//!     cointype: &'a str,
//! }
//!
//! let signed = signer.sign(&Params { cointype: "BTC" })?;
//! println!("body={} sign={}", signed.body, signed.signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
pub use signer::{RequestSigner, SignedPayload};
