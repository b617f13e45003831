//! Main REST client implementation

use coinspot_auth::{Credentials, RequestSigner};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::dispatcher::{RequestDispatcher, PRIVATE_BASE_URL, PUBLIC_BASE_URL};
use crate::endpoints::{FullAccessEndpoints, PublicEndpoints, ReadOnlyEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    AmountType, ApiStatusResponse, CancelOrderResponse, CoinDepositAddressResponse,
    CoinWithdrawalDetailsResponse, CompletedOrdersResponse, LatestBuySellPriceResponse,
    LatestCoinPricesResponse, LatestPricesResponse, MarketOrderResponse, MyCoinBalanceResponse,
    MyCoinBalancesResponse, NowOrderOptions, NowOrderResponse, OpenOrdersResponse, QuoteResponse,
    SwapNowOrderResponse, WithdrawCoinResponse, WithdrawRequest,
};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CoinSpot REST API client
///
/// The public catalog is always available. The read-only and full access
/// catalogs exist only when the client was built with credentials; calling
/// them otherwise fails with [`RestError::CredentialsRequired`] before any
/// request is made.
///
/// # Example
///
/// ```no_run
/// use coinspot_rest::{CoinspotClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinspotClient::new()?;
///     let btc = client.latest_coin_price("BTC").await?;
///     println!("BTC last: {}", btc.prices.last);
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CoinspotClient::with_credentials(creds)?;
///     let balances = auth_client.balance().await?;
///     println!("Holding {} coins", balances.balances.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinspotClient {
    public: PublicEndpoints,
    read_only: Option<ReadOnlyEndpoints>,
    full_access: Option<FullAccessEndpoints>,
}

impl CoinspotClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns [`RestError::Initialization`] if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("coinspot-rest/{}", env!("CARGO_PKG_VERSION")));
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs), &user_agent)
            .map_err(|e| RestError::Initialization(e.to_string()))?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let dispatcher = Arc::new(RequestDispatcher::new(
            transport,
            config.public_base_url,
            config.private_base_url,
        ));

        // Both private tiers sign through the process-wide nonce sequence
        let signer = config
            .credentials
            .map(|credentials| Arc::new(RequestSigner::new(credentials)));

        let client = Self {
            public: PublicEndpoints::new(dispatcher.clone()),
            read_only: signer
                .clone()
                .map(|s| ReadOnlyEndpoints::new(dispatcher.clone(), s)),
            full_access: signer.map(|s| FullAccessEndpoints::new(dispatcher.clone(), s)),
        };

        info!(
            authenticated = client.has_credentials(),
            "Created CoinSpot REST client"
        );
        client
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.read_only.is_some() && self.full_access.is_some()
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// Get public endpoints
    pub fn public(&self) -> &PublicEndpoints {
        &self.public
    }

    /// Latest prices for all coins
    pub async fn latest_prices(&self) -> RestResult<LatestPricesResponse> {
        self.public.get_latest_prices().await
    }

    /// Latest prices for one coin
    pub async fn latest_coin_price(&self, coin: &str) -> RestResult<LatestCoinPricesResponse> {
        self.public.get_latest_coin_price(coin).await
    }

    /// Latest buy rate for one coin
    pub async fn latest_buy_price(&self, coin: &str) -> RestResult<LatestBuySellPriceResponse> {
        self.public.get_latest_buy_price(coin).await
    }

    /// Latest sell rate for one coin
    pub async fn latest_sell_price(&self, coin: &str) -> RestResult<LatestBuySellPriceResponse> {
        self.public.get_latest_sell_price(coin).await
    }

    /// Open orders for one coin
    pub async fn open_order_list(&self, coin: &str) -> RestResult<OpenOrdersResponse> {
        self.public.get_open_orders(coin).await
    }

    /// Completed orders for one coin
    pub async fn completed_order_list(&self, coin: &str) -> RestResult<CompletedOrdersResponse> {
        self.public.get_completed_orders(coin).await
    }

    // ========================================================================
    // Read-only Endpoints
    // ========================================================================

    /// Get read-only endpoints (requires credentials)
    pub fn read_only(&self) -> RestResult<&ReadOnlyEndpoints> {
        self.read_only.as_ref().ok_or(RestError::CredentialsRequired)
    }

    /// Available balance of one coin
    pub async fn coin_balance(&self, coin: &str) -> RestResult<MyCoinBalanceResponse> {
        self.read_only()?.get_my_coin_balance(coin, true).await
    }

    /// Balances of every coin held
    pub async fn balance(&self) -> RestResult<MyCoinBalancesResponse> {
        self.read_only()?.get_my_coin_balances().await
    }

    /// Check the key against the read-only API
    pub async fn read_only_api_status(&self) -> RestResult<ApiStatusResponse> {
        self.read_only()?.check_api_status().await
    }

    // ========================================================================
    // Full Access Endpoints
    // ========================================================================

    /// Get full access endpoints (requires credentials)
    pub fn full_access(&self) -> RestResult<&FullAccessEndpoints> {
        self.full_access
            .as_ref()
            .ok_or(RestError::CredentialsRequired)
    }

    /// Check the key against the full access API
    pub async fn full_access_api_status(&self) -> RestResult<ApiStatusResponse> {
        self.full_access()?.check_api_status().await
    }

    /// Deposit addresses for a coin
    pub async fn coin_deposit_address(&self, coin: &str) -> RestResult<CoinDepositAddressResponse> {
        self.full_access()?.get_coin_deposit_address(coin).await
    }

    /// Place a limit buy order
    pub async fn market_buy_order(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
        market: Option<&str>,
    ) -> RestResult<MarketOrderResponse> {
        self.full_access()?
            .place_market_buy_order(coin, amount, rate, market)
            .await
    }

    /// Place a limit sell order
    pub async fn market_sell_order(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
        market: Option<&str>,
    ) -> RestResult<MarketOrderResponse> {
        self.full_access()?
            .place_market_sell_order(coin, amount, rate, market)
            .await
    }

    /// Cancel a buy order by id
    pub async fn cancel_buy_order(&self, id: &str) -> RestResult<CancelOrderResponse> {
        self.full_access()?.cancel_buy_order(id).await
    }

    /// Cancel a sell order by id
    pub async fn cancel_sell_order(&self, id: &str) -> RestResult<CancelOrderResponse> {
        self.full_access()?.cancel_sell_order(id).await
    }

    /// Cancel all buy orders, optionally only for one coin
    pub async fn cancel_all_buy_orders(&self, coin: Option<&str>) -> RestResult<CancelOrderResponse> {
        self.full_access()?.cancel_all_buy_orders(coin).await
    }

    /// Cancel all sell orders, optionally only for one coin
    pub async fn cancel_all_sell_orders(
        &self,
        coin: Option<&str>,
    ) -> RestResult<CancelOrderResponse> {
        self.full_access()?.cancel_all_sell_orders(coin).await
    }

    /// Buy immediately at the current rate
    pub async fn buy_now_order(
        &self,
        coin: &str,
        amount_type: AmountType,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<NowOrderResponse> {
        self.full_access()?
            .place_buy_now_order(coin, amount_type, amount, options)
            .await
    }

    /// Sell immediately at the current rate
    pub async fn sell_now_order(
        &self,
        coin: &str,
        amount_type: AmountType,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<NowOrderResponse> {
        self.full_access()?
            .place_sell_now_order(coin, amount_type, amount, options)
            .await
    }

    /// Swap one coin for another immediately
    pub async fn swap_now(
        &self,
        sell_coin: &str,
        buy_coin: &str,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<SwapNowOrderResponse> {
        self.full_access()?
            .place_swap_now_order(sell_coin, buy_coin, amount, options)
            .await
    }

    /// Quote for buying a coin at the current rate
    pub async fn buy_now_quote(
        &self,
        coin: &str,
        amount: Decimal,
        amount_type: AmountType,
    ) -> RestResult<QuoteResponse> {
        self.full_access()?
            .get_buy_now_quote(coin, amount, amount_type)
            .await
    }

    /// Quote for selling a coin at the current rate
    pub async fn sell_now_quote(
        &self,
        coin: &str,
        amount: Decimal,
        amount_type: AmountType,
    ) -> RestResult<QuoteResponse> {
        self.full_access()?
            .get_sell_now_quote(coin, amount, amount_type)
            .await
    }

    /// Quote for swapping one coin into another
    pub async fn swap_now_quote(
        &self,
        sell_coin: &str,
        buy_coin: &str,
        amount: Decimal,
    ) -> RestResult<QuoteResponse> {
        self.full_access()?
            .get_swap_now_quote(sell_coin, buy_coin, amount)
            .await
    }

    /// Fees, minimums and networks for withdrawing a coin
    pub async fn withdrawal_details(&self, coin: &str) -> RestResult<CoinWithdrawalDetailsResponse> {
        self.full_access()?.get_coin_withdrawal_details(coin).await
    }

    /// Send coins to an external address
    pub async fn withdraw_coins(&self, request: &WithdrawRequest) -> RestResult<WithdrawCoinResponse> {
        self.full_access()?.withdraw_coin(request).await
    }
}

impl std::fmt::Debug for CoinspotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinspotClient")
            .field("read_only", &self.read_only.is_some())
            .field("full_access", &self.full_access.is_some())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Base URL of the public API
    pub public_base_url: String,
    /// Base URL of the private API (read-only calls add `/ro`)
    pub private_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            public_base_url: PUBLIC_BASE_URL.to_string(),
            private_base_url: PRIVATE_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Point both APIs at another host, keeping the standard paths
    pub fn with_host(mut self, host: &str) -> Self {
        self.public_base_url = format!("https://{}/pubapi/v2", host);
        self.private_base_url = format!("https://{}/api/v2", host);
        self
    }

    /// Override the public base URL
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    /// Override the private base URL
    pub fn with_private_base_url(mut self, url: impl Into<String>) -> Self {
        self.private_base_url = url.into();
        self
    }
}
