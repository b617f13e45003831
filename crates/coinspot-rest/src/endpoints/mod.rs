//! API endpoint implementations, one catalog per access tier

pub mod public;
pub mod read_only;
pub mod full_access;

pub use public::PublicEndpoints;
pub use read_only::ReadOnlyEndpoints;
pub use full_access::FullAccessEndpoints;

use serde::Serialize;

/// Body of signed calls that take no parameters besides the nonce
#[derive(Serialize)]
pub(crate) struct NoParams {}
