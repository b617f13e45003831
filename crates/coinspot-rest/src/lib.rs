//! REST API client for the CoinSpot cryptocurrency exchange
//!
//! This crate provides a typed async client for CoinSpot's v2 REST API,
//! covering all three access tiers.
//!
//! # Features
//!
//! - **Public**: Latest prices, buy/sell rates, open and completed orders
//! - **Read-only**: Balances, open orders, order and transfer history
//! - **Full access**: Quotes, market and "now" orders, cancellation, withdrawals
//!
//! # Authentication
//!
//! Private endpoints require an API key and secret. Each request body is a
//! compact JSON object carrying a strictly increasing `nonce`, signed with
//! HMAC-SHA512 and sent byte-for-byte as signed.
//!
//! # Example
//!
//! ```no_run
//! use coinspot_rest::{AmountType, CoinspotClient, Credentials};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinspotClient::new()?;
//!     let prices = client.latest_prices().await?;
//!     println!("{} coins listed", prices.prices.len());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CoinspotClient::with_credentials(creds)?;
//!     let quote = auth_client
//!         .buy_now_quote("BTC", Decimal::new(1, 1), AmountType::Coin)
//!         .await?;
//!     println!("0.1 BTC at {}", quote.rate);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call returns either a decoded `status == "ok"` body or exactly one
//! [`RestError`]. Nothing is retried.

pub mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinspotClient};
pub use coinspot_auth::{AuthError, Credentials};
pub use dispatcher::{RequestDispatcher, Tier};
pub use endpoints::{FullAccessEndpoints, PublicEndpoints, ReadOnlyEndpoints};
pub use error::{RestError, RestResult};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export endpoint-specific types
pub use types::{
    // Request parameters
    AmountType, DateRange, Direction, NowOrderOptions, OrderHistoryFilter, WithdrawRequest,
    // Market data
    LatestBuySellPrice, LatestCoinPrices, LatestPrices, PriceData,
    // Account
    CoinBalance, CoinBalanceEntry, MyCoinBalance, MyCoinBalances,
    // Trading
    MarketOrderPlaced, NowOrderPlaced, Quote, SwapNowPlaced,
    // Responses
    ApiResponse,
};
