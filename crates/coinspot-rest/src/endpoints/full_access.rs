//! Full access endpoints for quotes, trading and withdrawals
//!
//! These endpoints require authentication with a full access key.

use coinspot_auth::RequestSigner;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use super::NoParams;
use crate::dispatcher::{RequestDispatcher, Tier};
use crate::error::RestResult;
use crate::types::{
    AmountType, ApiResponse, ApiStatusResponse, CancelOrderResponse, CoinDepositAddressResponse,
    CoinWithdrawalDetailsResponse, EditOrderResponse, MarketOrderResponse, NowOrderOptions,
    NowOrderResponse, QuoteResponse, SwapNowOrderResponse, WithdrawCoinResponse, WithdrawRequest,
};

#[derive(Serialize)]
struct CoinBody<'a> {
    cointype: &'a str,
}

#[derive(Serialize)]
struct QuoteBody<'a> {
    cointype: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    amounttype: AmountType,
}

#[derive(Serialize)]
struct SwapQuoteBody<'a> {
    cointypesell: &'a str,
    cointypebuy: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

#[derive(Serialize)]
struct MarketOrderBody<'a> {
    cointype: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    markettype: Option<&'a str>,
}

#[derive(Serialize)]
struct EditOrderBody<'a> {
    cointype: &'a str,
    id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    newrate: Decimal,
}

#[derive(Serialize)]
struct NowOrderBody<'a> {
    cointype: &'a str,
    amounttype: AmountType,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(flatten)]
    options: &'a NowOrderOptions,
}

#[derive(Serialize)]
struct SwapNowBody<'a> {
    cointypesell: &'a str,
    cointypebuy: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(flatten)]
    options: &'a NowOrderOptions,
}

#[derive(Serialize)]
struct OrderIdBody<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CancelAllBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    coin: Option<&'a str>,
}

impl<'a> CancelAllBody<'a> {
    fn new(coin: Option<&'a str>) -> Self {
        Self {
            coin: coin.filter(|c| !c.is_empty()),
        }
    }
}

/// Full access endpoints
#[derive(Debug, Clone)]
pub struct FullAccessEndpoints {
    dispatcher: Arc<RequestDispatcher>,
    signer: Arc<RequestSigner>,
}

impl FullAccessEndpoints {
    pub fn new(dispatcher: Arc<RequestDispatcher>, signer: Arc<RequestSigner>) -> Self {
        Self { dispatcher, signer }
    }

    async fn post<T, P>(&self, path: &str, params: &P) -> RestResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.dispatcher
            .post(Tier::FullAccess, &self.signer, path, params)
            .await
    }

    /// Check that the full access key is accepted
    #[instrument(skip(self))]
    pub async fn check_api_status(&self) -> RestResult<ApiStatusResponse> {
        self.post("/status", &NoParams {}).await
    }

    /// Deposit addresses for a coin, one per network
    #[instrument(skip(self))]
    pub async fn get_coin_deposit_address(
        &self,
        coin: &str,
    ) -> RestResult<CoinDepositAddressResponse> {
        self.post("/my/coin/deposit", &CoinBody { cointype: coin })
            .await
    }

    /// Quote for buying a coin now
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    /// * `amount` - Amount to buy
    /// * `amount_type` - Whether `amount` is in coin or AUD
    #[instrument(skip(self))]
    pub async fn get_buy_now_quote(
        &self,
        coin: &str,
        amount: Decimal,
        amount_type: AmountType,
    ) -> RestResult<QuoteResponse> {
        let body = QuoteBody {
            cointype: coin,
            amount,
            amounttype: amount_type,
        };
        self.post("/quote/buy/now", &body).await
    }

    /// Quote for selling a coin now
    #[instrument(skip(self))]
    pub async fn get_sell_now_quote(
        &self,
        coin: &str,
        amount: Decimal,
        amount_type: AmountType,
    ) -> RestResult<QuoteResponse> {
        let body = QuoteBody {
            cointype: coin,
            amount,
            amounttype: amount_type,
        };
        self.post("/quote/sell/now", &body).await
    }

    /// Quote for swapping `amount` of `sell_coin` into `buy_coin`
    #[instrument(skip(self))]
    pub async fn get_swap_now_quote(
        &self,
        sell_coin: &str,
        buy_coin: &str,
        amount: Decimal,
    ) -> RestResult<QuoteResponse> {
        let body = SwapQuoteBody {
            cointypesell: sell_coin,
            cointypebuy: buy_coin,
            amount,
        };
        self.post("/quote/swap/now", &body).await
    }

    /// Place a limit buy order on the market
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    /// * `amount` - Amount of coin to buy
    /// * `rate` - Price per coin
    /// * `market` - Market coin; AUD when `None`
    #[instrument(skip(self))]
    pub async fn place_market_buy_order(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
        market: Option<&str>,
    ) -> RestResult<MarketOrderResponse> {
        let body = MarketOrderBody {
            cointype: coin,
            amount,
            rate,
            markettype: market,
        };
        self.post("/my/buy", &body).await
    }

    /// Change the rate of an open buy order
    #[instrument(skip(self))]
    pub async fn edit_open_market_buy_order(
        &self,
        coin: &str,
        id: &str,
        rate: Decimal,
        new_rate: Decimal,
    ) -> RestResult<EditOrderResponse> {
        let body = EditOrderBody {
            cointype: coin,
            id,
            rate,
            newrate: new_rate,
        };
        self.post("/my/buy/edit", &body).await
    }

    /// Buy a coin immediately at the current rate
    #[instrument(skip(self))]
    pub async fn place_buy_now_order(
        &self,
        coin: &str,
        amount_type: AmountType,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<NowOrderResponse> {
        let body = NowOrderBody {
            cointype: coin,
            amounttype: amount_type,
            amount,
            options,
        };
        self.post("/my/buy/now", &body).await
    }

    /// Place a limit sell order on the market
    #[instrument(skip(self))]
    pub async fn place_market_sell_order(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
        market: Option<&str>,
    ) -> RestResult<MarketOrderResponse> {
        let body = MarketOrderBody {
            cointype: coin,
            amount,
            rate,
            markettype: market,
        };
        self.post("/my/sell", &body).await
    }

    /// Change the rate of an open sell order
    #[instrument(skip(self))]
    pub async fn edit_open_market_sell_order(
        &self,
        coin: &str,
        id: &str,
        rate: Decimal,
        new_rate: Decimal,
    ) -> RestResult<EditOrderResponse> {
        let body = EditOrderBody {
            cointype: coin,
            id,
            rate,
            newrate: new_rate,
        };
        self.post("/my/sell/edit", &body).await
    }

    /// Sell a coin immediately at the current rate
    #[instrument(skip(self))]
    pub async fn place_sell_now_order(
        &self,
        coin: &str,
        amount_type: AmountType,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<NowOrderResponse> {
        let body = NowOrderBody {
            cointype: coin,
            amounttype: amount_type,
            amount,
            options,
        };
        self.post("/my/sell/now", &body).await
    }

    /// Swap one coin for another immediately
    #[instrument(skip(self))]
    pub async fn place_swap_now_order(
        &self,
        sell_coin: &str,
        buy_coin: &str,
        amount: Decimal,
        options: &NowOrderOptions,
    ) -> RestResult<SwapNowOrderResponse> {
        let body = SwapNowBody {
            cointypesell: sell_coin,
            cointypebuy: buy_coin,
            amount,
            options,
        };
        self.post("/my/swap/now", &body).await
    }

    /// Cancel one open buy order
    #[instrument(skip(self))]
    pub async fn cancel_buy_order(&self, id: &str) -> RestResult<CancelOrderResponse> {
        self.post("/my/buy/cancel", &OrderIdBody { id }).await
    }

    /// Cancel every open buy order, or only those for `coin`
    #[instrument(skip(self))]
    pub async fn cancel_all_buy_orders(
        &self,
        coin: Option<&str>,
    ) -> RestResult<CancelOrderResponse> {
        self.post("/my/buy/cancel/all", &CancelAllBody::new(coin))
            .await
    }

    /// Cancel one open sell order
    #[instrument(skip(self))]
    pub async fn cancel_sell_order(&self, id: &str) -> RestResult<CancelOrderResponse> {
        self.post("/my/sell/cancel", &OrderIdBody { id }).await
    }

    /// Cancel every open sell order, or only those for `coin`
    #[instrument(skip(self))]
    pub async fn cancel_all_sell_orders(
        &self,
        coin: Option<&str>,
    ) -> RestResult<CancelOrderResponse> {
        self.post("/my/sell/cancel/all", &CancelAllBody::new(coin))
            .await
    }

    /// Fees, minimums and networks for withdrawing a coin
    #[instrument(skip(self))]
    pub async fn get_coin_withdrawal_details(
        &self,
        coin: &str,
    ) -> RestResult<CoinWithdrawalDetailsResponse> {
        self.post("/my/coin/withdraw/senddetails", &CoinBody { cointype: coin })
            .await
    }

    /// Send coins to an external address
    #[instrument(skip(self, request), fields(coin = %request.coin, amount = %request.amount))]
    pub async fn withdraw_coin(&self, request: &WithdrawRequest) -> RestResult<WithdrawCoinResponse> {
        self.post("/my/coin/withdraw/send", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::types::Direction;
    use coinspot_auth::{Credentials, NonceGenerator};
    use rust_decimal_macros::dec;

    const SECRET: &str = "full-secret";

    fn endpoints() -> (Arc<MockTransport>, FullAccessEndpoints) {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = RequestDispatcher::new(
            transport.clone(),
            "https://mock.test/pubapi/v2",
            "https://mock.test/api/v2",
        );
        let signer = RequestSigner::with_nonces(
            Credentials::new("full-key", SECRET).unwrap(),
            Arc::new(NonceGenerator::new()),
        );
        (
            transport,
            FullAccessEndpoints::new(Arc::new(dispatcher), Arc::new(signer)),
        )
    }

    /// Split `{"nonce":N,...}` into N and the remaining `,...}` text
    fn split_nonce(body: &str) -> (u64, &str) {
        let rest = body.strip_prefix(r#"{"nonce":"#).unwrap();
        let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap();
        (rest[..end].parse().unwrap(), &rest[end..])
    }

    fn last_params(transport: &MockTransport) -> String {
        let body = transport.last_request().unwrap().body.unwrap();
        split_nonce(&body).1.to_string()
    }

    #[tokio::test]
    async fn test_buy_now_quote_body_and_signature() {
        let (transport, full) = endpoints();
        transport.push_ok(r#"{"status":"ok","rate":95000.5}"#);

        let response = full
            .get_buy_now_quote("BTC", dec!(0.1), AmountType::Coin)
            .await
            .unwrap();
        assert_eq!(response.rate, dec!(95000.5));

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://mock.test/api/v2/quote/buy/now");

        let body = request.body.clone().unwrap();
        let (nonce, _) = split_nonce(&body);
        assert_eq!(
            body,
            format!(
                r#"{{"nonce":{},"cointype":"BTC","amount":0.1,"amounttype":"coin"}}"#,
                nonce
            )
        );

        let expected = Credentials::new("full-key", SECRET).unwrap().sign(&body).unwrap();
        assert_eq!(request.header("sign"), Some(expected.as_str()));
        assert_eq!(request.header("key"), Some("full-key"));
    }

    #[tokio::test]
    async fn test_cancel_all_coin_is_optional() {
        let (transport, full) = endpoints();
        for _ in 0..4 {
            transport.push_ok(r#"{"status":"ok"}"#);
        }

        full.cancel_all_buy_orders(None).await.unwrap();
        assert_eq!(last_params(&transport), "}");

        full.cancel_all_buy_orders(Some("BTC")).await.unwrap();
        assert_eq!(last_params(&transport), r#","coin":"BTC"}"#);

        full.cancel_all_sell_orders(Some("")).await.unwrap();
        assert_eq!(last_params(&transport), "}");

        full.cancel_all_sell_orders(Some("ETH")).await.unwrap();
        assert_eq!(last_params(&transport), r#","coin":"ETH"}"#);

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls[0], "https://mock.test/api/v2/my/buy/cancel/all");
        assert_eq!(urls[3], "https://mock.test/api/v2/my/sell/cancel/all");
    }

    #[tokio::test]
    async fn test_now_order_options() {
        let (transport, full) = endpoints();
        transport.push_ok(
            r#"{"status":"ok","coin":"BTC","amount":0.01,"market":"BTC/AUD","total":950}"#,
        );
        transport.push_ok(
            r#"{"status":"ok","coin":"ETH","amount":1,"market":"ETH/AUD","total":3000}"#,
        );

        full.place_buy_now_order("BTC", AmountType::Aud, dec!(950), &NowOrderOptions::new())
            .await
            .unwrap();
        assert_eq!(
            last_params(&transport),
            r#","cointype":"BTC","amounttype":"aud","amount":950.0}"#
        );

        let options = NowOrderOptions::new()
            .with_rate(dec!(3000))
            .with_threshold(dec!(1.5))
            .with_direction(Direction::Down);
        let response = full
            .place_sell_now_order("ETH", AmountType::Coin, dec!(1), &options)
            .await
            .unwrap();
        assert_eq!(response.total, dec!(3000));
        assert_eq!(
            last_params(&transport),
            r#","cointype":"ETH","amounttype":"coin","amount":1.0,"rate":3000.0,"threshold":1.5,"direction":"DOWN"}"#
        );
    }

    #[tokio::test]
    async fn test_swap_now() {
        let (transport, full) = endpoints();
        transport.push_ok(r#"{"status":"ok","rate":0.05}"#);
        transport.push_ok(
            r#"{"status":"ok","coin":"ETH","amount":0.5,"rate":0.05,"market":"ETH/BTC","total":0.025}"#,
        );

        full.get_swap_now_quote("ETH", "BTC", dec!(0.5)).await.unwrap();
        assert_eq!(
            last_params(&transport),
            r#","cointypesell":"ETH","cointypebuy":"BTC","amount":0.5}"#
        );

        let options = NowOrderOptions::new().with_threshold(dec!(2));
        let response = full
            .place_swap_now_order("ETH", "BTC", dec!(0.5), &options)
            .await
            .unwrap();
        assert_eq!(response.market, "ETH/BTC");
        assert_eq!(
            last_params(&transport),
            r#","cointypesell":"ETH","cointypebuy":"BTC","amount":0.5,"threshold":2.0}"#
        );
    }

    #[tokio::test]
    async fn test_market_orders() {
        let (transport, full) = endpoints();
        transport.push_ok(
            r#"{"status":"ok","coin":"BTC","market":"BTC/AUD","amount":0.5,"rate":90000,"id":"abc123"}"#,
        );
        transport.push_ok(
            r#"{"status":"ok","updated":true,"id":"abc123","coin":"BTC","rate":90000,"newrate":91000,"amount":0.5,"total":45500}"#,
        );
        transport.push_ok(
            r#"{"status":"ok","coin":"BTC","market":"BTC/USDT","amount":0.5,"rate":60000,"id":"def456"}"#,
        );

        let placed = full
            .place_market_buy_order("BTC", dec!(0.5), dec!(90000), None)
            .await
            .unwrap();
        assert_eq!(placed.id, "abc123");
        assert_eq!(
            last_params(&transport),
            r#","cointype":"BTC","amount":0.5,"rate":90000.0}"#
        );

        let edited = full
            .edit_open_market_buy_order("BTC", "abc123", dec!(90000), dec!(91000))
            .await
            .unwrap();
        assert!(edited.updated);
        assert_eq!(
            last_params(&transport),
            r#","cointype":"BTC","id":"abc123","rate":90000.0,"newrate":91000.0}"#
        );

        full.place_market_sell_order("BTC", dec!(0.5), dec!(60000), Some("USDT"))
            .await
            .unwrap();
        assert_eq!(
            last_params(&transport),
            r#","cointype":"BTC","amount":0.5,"rate":60000.0,"markettype":"USDT"}"#
        );

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://mock.test/api/v2/my/buy",
                "https://mock.test/api/v2/my/buy/edit",
                "https://mock.test/api/v2/my/sell",
            ]
        );
    }

    #[tokio::test]
    async fn test_withdrawal() {
        let (transport, full) = endpoints();
        transport.push_ok(
            r#"{"status":"ok","networks":[
                {"network":"BTC","fee":0.0001,"minsend":0.001,"default":true},
                {"network":"LIGHTNING","fee":0,"minsend":0.00001,"default":false}
            ]}"#,
        );
        transport.push_ok(r#"{"status":"ok"}"#);

        let details = full.get_coin_withdrawal_details("BTC").await.unwrap();
        assert_eq!(details.default_network().unwrap().network, "BTC");
        assert_eq!(last_params(&transport), r#","cointype":"BTC"}"#);

        let request = WithdrawRequest::new("BTC", dec!(0.01), "bc1qexample").with_email_confirm(true);
        full.withdraw_coin(&request).await.unwrap();
        assert_eq!(
            last_params(&transport),
            r#","cointype":"BTC","amount":0.01,"address":"bc1qexample","emailconfirm":"YES"}"#
        );
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://mock.test/api/v2/my/coin/withdraw/send"
        );
    }

    #[tokio::test]
    async fn test_remote_rejection_is_not_prevalidated() {
        let (transport, full) = endpoints();
        transport.push_ok(r#"{"status":"error","message":"Invalid amount"}"#);

        let err = full
            .get_sell_now_quote("BTC", dec!(-1), AmountType::Coin)
            .await
            .unwrap_err();
        assert!(err.is_api_error());
        assert_eq!(transport.request_count(), 1);
    }
}
