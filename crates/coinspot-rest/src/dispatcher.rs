//! Request dispatch and response normalization
//!
//! Every call goes out through [`RequestDispatcher`] and comes back as either
//! a decoded `status == "ok"` body or exactly one [`RestError`].

use coinspot_auth::RequestSigner;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{RestError, RestResult};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::types::ApiResponse;

/// Default base URL of the public (unauthenticated) API
pub const PUBLIC_BASE_URL: &str = "https://www.coinspot.com.au/pubapi/v2";
/// Default base URL of the private (signed) API
pub const PRIVATE_BASE_URL: &str = "https://www.coinspot.com.au/api/v2";
/// Segment inserted after the private base for read-only endpoints
pub const READ_ONLY_SEGMENT: &str = "/ro";

/// API access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Unauthenticated GET endpoints
    Public,
    /// Signed POST endpoints under `/ro`
    ReadOnly,
    /// Signed POST endpoints that can trade and withdraw
    FullAccess,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::ReadOnly => write!(f, "read-only"),
            Self::FullAccess => write!(f, "full-access"),
        }
    }
}

/// Issues HTTP calls and normalizes their outcome
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
    public_base_url: String,
    private_base_url: String,
}

impl RequestDispatcher {
    /// Create a dispatcher over `transport`
    pub fn new(
        transport: Arc<dyn Transport>,
        public_base_url: impl Into<String>,
        private_base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            public_base_url: trim_base(public_base_url.into()),
            private_base_url: trim_base(private_base_url.into()),
        }
    }

    /// Absolute URL of `path` for `tier`
    pub fn url(&self, tier: Tier, path: &str) -> String {
        match tier {
            Tier::Public => format!("{}{}", self.public_base_url, path),
            Tier::ReadOnly => format!("{}{}{}", self.private_base_url, READ_ONLY_SEGMENT, path),
            Tier::FullAccess => format!("{}{}", self.private_base_url, path),
        }
    }

    /// Unauthenticated GET
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RestResult<ApiResponse<T>> {
        let url = self.url(Tier::Public, path);
        debug!("GET {}", url);

        let response = self.send(HttpRequest::get(&url)).await?;
        handle_response(response, &url)
    }

    /// Signed POST
    ///
    /// `params` are signed once and the signed string is sent as the body.
    #[instrument(skip(self, signer, params))]
    pub async fn post<T, P>(
        &self,
        tier: Tier,
        signer: &RequestSigner,
        path: &str,
        params: &P,
    ) -> RestResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.url(tier, path);
        let signed = signer.sign(params)?;
        debug!(nonce = signed.nonce, "POST {} ({})", url, tier);

        let request = HttpRequest::post(&url, signed.body)
            .with_header("Content-Type", "application/json")
            .with_header("sign", signed.signature)
            .with_header("key", signer.api_key());

        let response = self.send(request).await?;
        handle_response(response, &url)
    }

    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        self.transport.send(request).await.map_err(|e| {
            warn!("Transport failure: {}", e);
            RestError::Transport {
                status: None,
                message: e.to_string(),
            }
        })
    }
}

impl fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("public_base_url", &self.public_base_url)
            .field("private_base_url", &self.private_base_url)
            .finish()
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Map a raw response onto the success shape or one error kind
///
/// 1. Non-2xx status: transport error, body ignored
/// 2. Body's `status` not `"ok"`: application error
/// 3. Otherwise decode into `T`; a shape mismatch is a malformed response
pub(crate) fn handle_response<T: DeserializeOwned>(
    response: HttpResponse,
    url: &str,
) -> RestResult<ApiResponse<T>> {
    if !response.is_success() {
        let message = http_error_text(response.status, url);
        warn!("{}", message);
        return Err(RestError::Transport {
            status: Some(response.status),
            message,
        });
    }

    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| RestError::MalformedResponse(format!("invalid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| RestError::MalformedResponse("expected a JSON object".to_string()))?;

    match object.get("status") {
        Some(Value::String(status)) if status == "ok" => {}
        status => {
            let status = match status {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "null".to_string(),
            };
            let message = match object.get("message") {
                Some(Value::String(m)) => Some(m.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };
            warn!(status = %status, "API returned error status");
            return Err(RestError::api(status, message));
        }
    }

    serde_json::from_value(value).map_err(|e| RestError::MalformedResponse(e.to_string()))
}

/// `"<code> Client Error: <reason> for url: <url>"`
fn http_error_text(status: u16, url: &str) -> String {
    let kind = if (400..500).contains(&status) {
        "Client Error"
    } else if (500..600).contains(&status) {
        "Server Error"
    } else {
        "Unexpected Status"
    };
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    format!("{} {}: {} for url: {}", status, kind, reason, url)
}
