//! Types for CoinSpot REST API requests and responses
//!
//! Response shapes follow the exchange's JSON field-for-field. Numeric fields
//! are [`Decimal`] and accept either JSON numbers or numeric strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

// ============================================================================
// Response Wrapper
// ============================================================================

/// Envelope shared by every CoinSpot response
///
/// The dispatcher only hands these out when `status == "ok"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response status (`"ok"` on success)
    pub status: String,
    /// Optional human readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Endpoint specific fields
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Discard the envelope
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Body of responses that carry nothing beyond `status`/`message`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

// ============================================================================
// Market Data Types (public)
// ============================================================================

/// Bid/ask/last prices for one coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    /// Best bid
    pub bid: Decimal,
    /// Best ask
    pub ask: Decimal,
    /// Last traded price
    pub last: Decimal,
}

impl PriceData {
    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Midpoint of bid and ask
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}

/// Latest prices for every coin, keyed by lowercase coin symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPrices {
    pub prices: HashMap<String, PriceData>,
}

impl LatestPrices {
    /// Look up a coin, ignoring case
    pub fn get(&self, coin: &str) -> Option<&PriceData> {
        self.prices
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(coin))
            .map(|(_, v)| v)
    }
}

/// Latest prices for one coin (or coin/market pair)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestCoinPrices {
    pub prices: PriceData,
}

/// Latest buy or sell rate for one coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestBuySellPrice {
    pub rate: Decimal,
    pub market: String,
}

/// An order in the public book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub coin: String,
    pub market: String,
}

/// Open buy and sell orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrders {
    pub buyorders: Vec<OpenOrder>,
    pub sellorders: Vec<OpenOrder>,
}

/// A filled order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub coin: String,
    pub market: String,
    pub solddate: String,
    /// Fee excluding GST (account history only)
    #[serde(rename = "audfeeExGst", default, skip_serializing_if = "Option::is_none")]
    pub audfee_ex_gst: Option<Decimal>,
    /// GST on the fee (account history only)
    #[serde(rename = "audGst", default, skip_serializing_if = "Option::is_none")]
    pub aud_gst: Option<Decimal>,
    /// Total in AUD (account history only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audtotal: Option<Decimal>,
}

/// Completed buy and sell orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrders {
    pub buyorders: Vec<CompletedOrder>,
    pub sellorders: Vec<CompletedOrder>,
}

// ============================================================================
// Account Types (read-only)
// ============================================================================

/// Holdings of one coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    pub balance: Decimal,
    pub audbalance: Decimal,
    pub rate: Decimal,
}

/// One element of the balances list: a single `{"<COIN>": {...}}` map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinBalanceEntry {
    pub coin: String,
    pub balance: CoinBalance,
}

impl Serialize for CoinBalanceEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.coin, &self.balance)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CoinBalanceEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = CoinBalanceEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with exactly one coin entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let (coin, balance) = map
                    .next_entry::<String, CoinBalance>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(CoinBalanceEntry { coin, balance })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// All coin balances, in the order the exchange lists them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyCoinBalances {
    pub balances: Vec<CoinBalanceEntry>,
}

impl MyCoinBalances {
    /// Look up a coin, ignoring case
    pub fn get(&self, coin: &str) -> Option<&CoinBalance> {
        self.balances
            .iter()
            .find(|e| e.coin.eq_ignore_ascii_case(coin))
            .map(|e| &e.balance)
    }

    /// Sum of all AUD valuations
    pub fn total_aud(&self) -> Decimal {
        self.balances.iter().map(|e| e.balance.audbalance).sum()
    }
}

/// Balance of a single coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyCoinBalance {
    pub balance: HashMap<String, CoinBalance>,
}

/// One of the caller's open market orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyOpenOrder {
    pub id: String,
    pub coin: String,
    pub market: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// The caller's open market orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyOpenOrders {
    pub buyorders: Vec<MyOpenOrder>,
    pub sellorders: Vec<MyOpenOrder>,
}

/// One of the caller's open limit orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyLimitOrder {
    pub id: String,
    pub coin: String,
    pub rate: Decimal,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
}

/// The caller's open limit orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyLimitOrders {
    pub buyorders: Vec<MyLimitOrder>,
    pub sellorders: Vec<MyLimitOrder>,
}

/// Outgoing coin transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendTransaction {
    pub timestamp: String,
    pub amount: Decimal,
    pub coin: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendfee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendfeeaud: Option<Decimal>,
}

/// Incoming coin transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveTransaction {
    pub timestamp: String,
    pub amount: Decimal,
    pub coin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Decimal>,
}

/// Coin send/receive history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendReceiveHistory {
    pub sendtransactions: Vec<SendTransaction>,
    pub receivetransactions: Vec<ReceiveTransaction>,
}

/// AUD deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Decimal,
    pub created: String,
    pub status: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub deposit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// AUD deposit history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositHistory {
    pub deposits: Vec<Deposit>,
}

/// AUD withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub amount: Decimal,
    pub created: String,
    pub status: String,
}

/// AUD withdrawal history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalHistory {
    pub withdrawals: Vec<Withdrawal>,
}

/// Monthly affiliate payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliatePayment {
    pub amount: Decimal,
    pub month: String,
}

/// Affiliate payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliatePayments {
    pub payments: Vec<AffiliatePayment>,
}

/// Referral payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralPayment {
    pub amount: Decimal,
    pub coin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audamount: Option<Decimal>,
    pub timestamp: String,
}

/// Referral payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralPayments {
    pub payments: Vec<ReferralPayment>,
}

// ============================================================================
// Trading & Funding Types (full access)
// ============================================================================

/// Deposit address on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositNetwork {
    pub name: String,
    pub network: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Deposit addresses for a coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinDepositAddress {
    pub networks: Vec<DepositNetwork>,
}

/// Buy, sell or swap quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub rate: Decimal,
}

/// Confirmation of a placed market order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderPlaced {
    pub coin: String,
    pub market: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub id: String,
}

/// Confirmation of an edited market order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderEdited {
    pub updated: bool,
    pub id: String,
    pub coin: String,
    pub rate: Decimal,
    pub newrate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
}

/// Confirmation of a buy-now or sell-now order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowOrderPlaced {
    pub coin: String,
    pub amount: Decimal,
    pub market: String,
    pub total: Decimal,
}

/// Confirmation of a swap-now order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapNowPlaced {
    pub coin: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub market: String,
    pub total: Decimal,
}

/// Withdrawal parameters for one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkWithdrawalDetails {
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymentid: Option<String>,
    pub fee: Decimal,
    pub minsend: Decimal,
    pub default: bool,
}

/// Withdrawal parameters for a coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinWithdrawalDetails {
    pub networks: Vec<NetworkWithdrawalDetails>,
}

impl CoinWithdrawalDetails {
    /// The network the exchange uses when none is given
    pub fn default_network(&self) -> Option<&NetworkWithdrawalDetails> {
        self.networks.iter().find(|n| n.default)
    }
}

// Response aliases

pub type ApiStatusResponse = ApiResponse<Ack>;
pub type LatestPricesResponse = ApiResponse<LatestPrices>;
pub type LatestCoinPricesResponse = ApiResponse<LatestCoinPrices>;
pub type LatestBuySellPriceResponse = ApiResponse<LatestBuySellPrice>;
pub type OpenOrdersResponse = ApiResponse<OpenOrders>;
pub type CompletedOrdersResponse = ApiResponse<CompletedOrders>;
pub type MyCoinBalancesResponse = ApiResponse<MyCoinBalances>;
pub type MyCoinBalanceResponse = ApiResponse<MyCoinBalance>;
pub type MyOpenOrdersResponse = ApiResponse<MyOpenOrders>;
pub type MyLimitOrdersResponse = ApiResponse<MyLimitOrders>;
pub type SendReceiveHistoryResponse = ApiResponse<SendReceiveHistory>;
pub type DepositHistoryResponse = ApiResponse<DepositHistory>;
pub type WithdrawalHistoryResponse = ApiResponse<WithdrawalHistory>;
pub type AffiliatePaymentsResponse = ApiResponse<AffiliatePayments>;
pub type ReferralPaymentsResponse = ApiResponse<ReferralPayments>;
pub type CoinDepositAddressResponse = ApiResponse<CoinDepositAddress>;
pub type QuoteResponse = ApiResponse<Quote>;
pub type MarketOrderResponse = ApiResponse<MarketOrderPlaced>;
pub type EditOrderResponse = ApiResponse<MarketOrderEdited>;
pub type NowOrderResponse = ApiResponse<NowOrderPlaced>;
pub type SwapNowOrderResponse = ApiResponse<SwapNowPlaced>;
pub type CancelOrderResponse = ApiResponse<Ack>;
pub type CoinWithdrawalDetailsResponse = ApiResponse<CoinWithdrawalDetails>;
pub type WithdrawCoinResponse = ApiResponse<Ack>;

// ============================================================================
// Request Types
// ============================================================================

/// Unit of a buy/sell amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    /// Amount is in the coin being traded
    Coin,
    /// Amount is in Australian dollars
    Aud,
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin => write!(f, "coin"),
            Self::Aud => write!(f, "aud"),
        }
    }
}

/// Which side of `rate` a now-order tolerates before it is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Both,
}

/// Optional price protection for buy-now, sell-now and swap-now orders
///
/// Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NowOrderOptions {
    /// Rate the order was quoted at
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate: Option<Decimal>,
    /// Allowed slippage from `rate`, in percent
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub threshold: Option<Decimal>,
    /// Which direction of slippage is tolerated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl NowOrderOptions {
    /// No price protection
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quoted rate
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the slippage threshold
    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the slippage direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Optional filters for order history queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderHistoryFilter {
    /// Market coin (e.g. "USDT"); AUD when absent
    #[serde(rename = "markettype", skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// First day included
    #[serde(rename = "startdate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day included
    #[serde(rename = "enddate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Maximum number of orders returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl OrderHistoryFilter {
    /// No filtering
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one market
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Restrict to a date range
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Cap the number of results
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Optional date range for transfer history queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(rename = "startdate", skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(rename = "enddate", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range
    pub fn all() -> Self {
        Self::default()
    }

    /// Range between two optional days
    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

/// Coin withdrawal request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawRequest {
    #[serde(rename = "cointype")]
    pub coin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub address: String,
    /// Require email confirmation before the withdrawal is sent
    #[serde(
        rename = "emailconfirm",
        serialize_with = "yes_no_upper",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_confirm: Option<bool>,
    /// Network to withdraw on; the coin's default network when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Memo / destination tag
    #[serde(rename = "paymentid", skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

impl WithdrawRequest {
    /// Withdraw `amount` of `coin` to `address` on the default network
    pub fn new(coin: impl Into<String>, amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            amount,
            address: address.into(),
            email_confirm: None,
            network: None,
            payment_id: None,
        }
    }

    /// Ask for (or decline) email confirmation
    pub fn with_email_confirm(mut self, confirm: bool) -> Self {
        self.email_confirm = Some(confirm);
        self
    }

    /// Withdraw on a specific network
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Attach a payment id / memo
    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }
}

fn yes_no_upper<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(true) => serializer.serialize_str("YES"),
        Some(false) => serializer.serialize_str("NO"),
        None => serializer.serialize_none(),
    }
}

/// `available` flag of the single-balance query
pub(crate) fn yes_no_lower<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "yes" } else { "no" })
}
