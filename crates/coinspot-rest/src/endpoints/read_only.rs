//! Read-only account endpoints
//!
//! These endpoints require authentication. Requests go to the `/ro` branch of
//! the private API, so a read-only key is sufficient.

use coinspot_auth::RequestSigner;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use super::NoParams;
use crate::dispatcher::{RequestDispatcher, Tier};
use crate::error::RestResult;
use crate::types::{
    yes_no_lower, AffiliatePaymentsResponse, ApiResponse, ApiStatusResponse, CompletedOrdersResponse,
    DateRange, DepositHistoryResponse, MyCoinBalanceResponse, MyCoinBalancesResponse,
    MyLimitOrdersResponse, MyOpenOrdersResponse, OpenOrdersResponse, OrderHistoryFilter,
    ReferralPaymentsResponse, SendReceiveHistoryResponse, WithdrawalHistoryResponse,
};

#[derive(Serialize)]
struct MarketBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cointype: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markettype: Option<&'a str>,
}

#[derive(Serialize)]
struct CoinBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cointype: Option<&'a str>,
}

#[derive(Serialize)]
struct HistoryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cointype: Option<&'a str>,
    #[serde(flatten)]
    filter: &'a OrderHistoryFilter,
}

#[derive(Serialize)]
struct AvailableBody {
    #[serde(serialize_with = "yes_no_lower")]
    available: bool,
}

/// Read-only account endpoints
#[derive(Debug, Clone)]
pub struct ReadOnlyEndpoints {
    dispatcher: Arc<RequestDispatcher>,
    signer: Arc<RequestSigner>,
}

impl ReadOnlyEndpoints {
    pub fn new(dispatcher: Arc<RequestDispatcher>, signer: Arc<RequestSigner>) -> Self {
        Self { dispatcher, signer }
    }

    async fn post<T, P>(&self, path: &str, params: &P) -> RestResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.dispatcher
            .post(Tier::ReadOnly, &self.signer, path, params)
            .await
    }

    /// Check that the read-only key is accepted
    #[instrument(skip(self))]
    pub async fn check_api_status(&self) -> RestResult<ApiStatusResponse> {
        self.post("/status", &NoParams {}).await
    }

    /// Open market orders, optionally for one coin and market
    #[instrument(skip(self))]
    pub async fn get_open_market_orders(
        &self,
        coin: Option<&str>,
        market: Option<&str>,
    ) -> RestResult<OpenOrdersResponse> {
        let body = MarketBody {
            cointype: coin,
            markettype: market,
        };
        self.post("/orders/market/open", &body).await
    }

    /// Completed market orders for a coin
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    /// * `filter` - Market, date range and limit; unset fields are not sent
    #[instrument(skip(self, filter))]
    pub async fn get_completed_market_orders(
        &self,
        coin: &str,
        filter: &OrderHistoryFilter,
    ) -> RestResult<CompletedOrdersResponse> {
        let body = HistoryBody {
            cointype: Some(coin),
            filter,
        };
        self.post("/orders/market/completed", &body).await
    }

    /// Balances of every coin held
    #[instrument(skip(self))]
    pub async fn get_my_coin_balances(&self) -> RestResult<MyCoinBalancesResponse> {
        self.post("/my/balances", &NoParams {}).await
    }

    /// Balance of one coin
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    /// * `available` - Report only the balance not locked in open orders
    #[instrument(skip(self))]
    pub async fn get_my_coin_balance(
        &self,
        coin: &str,
        available: bool,
    ) -> RestResult<MyCoinBalanceResponse> {
        self.post(&format!("/my/balance/{}", coin), &AvailableBody { available })
            .await
    }

    /// The caller's open market orders
    #[instrument(skip(self))]
    pub async fn get_my_open_market_orders(
        &self,
        coin: Option<&str>,
        market: Option<&str>,
    ) -> RestResult<MyOpenOrdersResponse> {
        let body = MarketBody {
            cointype: coin,
            markettype: market,
        };
        self.post("/my/orders/market/open", &body).await
    }

    /// The caller's open limit orders
    #[instrument(skip(self))]
    pub async fn get_my_open_limit_orders(
        &self,
        coin: Option<&str>,
    ) -> RestResult<MyLimitOrdersResponse> {
        self.post("/my/orders/limit/open", &CoinBody { cointype: coin })
            .await
    }

    /// The caller's completed orders
    #[instrument(skip(self, filter))]
    pub async fn get_my_order_history(
        &self,
        coin: Option<&str>,
        filter: &OrderHistoryFilter,
    ) -> RestResult<CompletedOrdersResponse> {
        let body = HistoryBody {
            cointype: coin,
            filter,
        };
        self.post("/my/orders/completed", &body).await
    }

    /// The caller's completed market orders
    #[instrument(skip(self, filter))]
    pub async fn get_my_market_order_history(
        &self,
        coin: Option<&str>,
        filter: &OrderHistoryFilter,
    ) -> RestResult<CompletedOrdersResponse> {
        let body = HistoryBody {
            cointype: coin,
            filter,
        };
        self.post("/my/orders/market/completed", &body).await
    }

    /// Coin transfers in and out of the account
    #[instrument(skip(self))]
    pub async fn get_my_send_receive_history(
        &self,
        range: DateRange,
    ) -> RestResult<SendReceiveHistoryResponse> {
        self.post("/my/sendreceive", &range).await
    }

    /// AUD deposits
    #[instrument(skip(self))]
    pub async fn get_my_deposit_history(
        &self,
        range: DateRange,
    ) -> RestResult<DepositHistoryResponse> {
        self.post("/my/deposits", &range).await
    }

    /// AUD withdrawals
    #[instrument(skip(self))]
    pub async fn get_my_withdrawal_history(
        &self,
        range: DateRange,
    ) -> RestResult<WithdrawalHistoryResponse> {
        self.post("/my/withdrawals", &range).await
    }

    /// Affiliate payments received
    #[instrument(skip(self))]
    pub async fn get_my_affiliate_payments(&self) -> RestResult<AffiliatePaymentsResponse> {
        self.post("/my/affiliatepayments", &NoParams {}).await
    }

    /// Referral payments received
    #[instrument(skip(self))]
    pub async fn get_my_referral_payments(&self) -> RestResult<ReferralPaymentsResponse> {
        self.post("/my/referralpayments", &NoParams {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use chrono::NaiveDate;
    use coinspot_auth::{Credentials, NonceGenerator};
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn endpoints() -> (Arc<MockTransport>, ReadOnlyEndpoints) {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = RequestDispatcher::new(
            transport.clone(),
            "https://mock.test/pubapi/v2",
            "https://mock.test/api/v2",
        );
        let signer = RequestSigner::with_nonces(
            Credentials::new("ro-key", "ro-secret").unwrap(),
            Arc::new(NonceGenerator::new()),
        );
        (
            transport,
            ReadOnlyEndpoints::new(Arc::new(dispatcher), Arc::new(signer)),
        )
    }

    /// Sent body without the nonce
    fn sent_params(transport: &MockTransport) -> Value {
        let body = transport.last_request().unwrap().body.unwrap();
        let mut value: Value = serde_json::from_str(&body).unwrap();
        let object = value.as_object_mut().unwrap();
        assert!(object.remove("nonce").unwrap().is_u64());
        value
    }

    #[tokio::test]
    async fn test_status_uses_read_only_branch() {
        let (transport, ro) = endpoints();
        transport.push_ok(r#"{"status":"ok"}"#);

        ro.check_api_status().await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://mock.test/api/v2/ro/status");
        assert_eq!(request.header("key"), Some("ro-key"));
        assert_eq!(sent_params(&transport), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_coin_balance_available_flag() {
        let (transport, ro) = endpoints();
        transport.push_ok(
            r#"{"status":"ok","balance":{"BTC":{"balance":0.5,"audbalance":50000,"rate":100000}}}"#,
        );

        let response = ro.get_my_coin_balance("BTC", true).await.unwrap();
        assert_eq!(response.balance["BTC"].balance, dec!(0.5));

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://mock.test/api/v2/ro/my/balance/BTC");
        assert_eq!(sent_params(&transport), serde_json::json!({"available": "yes"}));
    }

    #[tokio::test]
    async fn test_balances_keep_order() {
        let (transport, ro) = endpoints();
        transport.push_ok(
            r#"{"status":"ok","balances":[
                {"ETH":{"balance":2,"audbalance":6000,"rate":3000}},
                {"BTC":{"balance":0.1,"audbalance":10000,"rate":100000}}
            ]}"#,
        );

        let response = ro.get_my_coin_balances().await.unwrap();
        let coins: Vec<&str> = response.balances.iter().map(|e| e.coin.as_str()).collect();
        assert_eq!(coins, vec!["ETH", "BTC"]);
        assert_eq!(response.total_aud(), dec!(16000));
    }

    #[tokio::test]
    async fn test_absent_optionals_are_not_sent() {
        let (transport, ro) = endpoints();
        let orders = r#"{"status":"ok","buyorders":[],"sellorders":[]}"#;

        transport.push_ok(orders);
        ro.get_open_market_orders(None, None).await.unwrap();
        assert_eq!(sent_params(&transport), serde_json::json!({}));

        transport.push_ok(orders);
        ro.get_my_open_market_orders(Some("BTC"), None).await.unwrap();
        assert_eq!(sent_params(&transport), serde_json::json!({"cointype": "BTC"}));

        transport.push_ok(orders);
        ro.get_my_open_limit_orders(None).await.unwrap();
        assert_eq!(sent_params(&transport), serde_json::json!({}));

        transport.push_ok(orders);
        ro.get_my_order_history(None, &OrderHistoryFilter::new())
            .await
            .unwrap();
        assert_eq!(sent_params(&transport), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_history_filter_is_flattened() {
        let (transport, ro) = endpoints();
        transport.push_ok(r#"{"status":"ok","buyorders":[],"sellorders":[]}"#);

        let filter = OrderHistoryFilter::new()
            .with_market("USDT")
            .with_dates(NaiveDate::from_ymd_opt(2024, 1, 1), None)
            .with_limit(50);
        ro.get_completed_market_orders("BTC", &filter).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://mock.test/api/v2/ro/orders/market/completed");
        let body = request.body.unwrap();
        assert!(body.ends_with(
            r#","cointype":"BTC","markettype":"USDT","startdate":"2024-01-01","limit":50}"#
        ));
    }

    #[tokio::test]
    async fn test_transfer_history_paths() {
        let (transport, ro) = endpoints();
        transport.push_ok(r#"{"status":"ok","sendtransactions":[],"receivetransactions":[]}"#);
        transport.push_ok(r#"{"status":"ok","deposits":[]}"#);
        transport.push_ok(r#"{"status":"ok","withdrawals":[]}"#);
        transport.push_ok(r#"{"status":"ok","payments":[]}"#);
        transport.push_ok(r#"{"status":"ok","payments":[]}"#);

        let range = DateRange::between(None, NaiveDate::from_ymd_opt(2024, 6, 30));
        ro.get_my_send_receive_history(range).await.unwrap();
        assert_eq!(sent_params(&transport), serde_json::json!({"enddate": "2024-06-30"}));
        ro.get_my_deposit_history(DateRange::all()).await.unwrap();
        ro.get_my_withdrawal_history(DateRange::all()).await.unwrap();
        ro.get_my_affiliate_payments().await.unwrap();
        ro.get_my_referral_payments().await.unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://mock.test/api/v2/ro/my/sendreceive",
                "https://mock.test/api/v2/ro/my/deposits",
                "https://mock.test/api/v2/ro/my/withdrawals",
                "https://mock.test/api/v2/ro/my/affiliatepayments",
                "https://mock.test/api/v2/ro/my/referralpayments",
            ]
        );
    }
}
