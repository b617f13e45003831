//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use std::sync::Arc;
use tracing::instrument;

use crate::dispatcher::RequestDispatcher;
use crate::error::RestResult;
use crate::types::{
    CompletedOrdersResponse, LatestBuySellPriceResponse, LatestCoinPricesResponse,
    LatestPricesResponse, OpenOrdersResponse,
};

/// Public market data endpoints
#[derive(Debug, Clone)]
pub struct PublicEndpoints {
    dispatcher: Arc<RequestDispatcher>,
}

impl PublicEndpoints {
    pub fn new(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Latest prices for all coins
    #[instrument(skip(self))]
    pub async fn get_latest_prices(&self) -> RestResult<LatestPricesResponse> {
        self.dispatcher.get("/latest").await
    }

    /// Latest prices for one coin in AUD
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn get_latest_coin_price(&self, coin: &str) -> RestResult<LatestCoinPricesResponse> {
        self.dispatcher.get(&format!("/latest/{}", coin)).await
    }

    /// Latest prices for one coin in another market
    ///
    /// # Arguments
    /// * `coin` - Coin symbol (e.g., "BTC")
    /// * `market` - Market coin (e.g., "USDT")
    #[instrument(skip(self))]
    pub async fn get_latest_coin_market_price(
        &self,
        coin: &str,
        market: &str,
    ) -> RestResult<LatestCoinPricesResponse> {
        self.dispatcher
            .get(&format!("/latest/{}/{}", coin, market))
            .await
    }

    /// Latest buy rate for one coin
    #[instrument(skip(self))]
    pub async fn get_latest_buy_price(&self, coin: &str) -> RestResult<LatestBuySellPriceResponse> {
        self.dispatcher.get(&format!("/buyprice/{}", coin)).await
    }

    /// Latest buy rate for one coin in another market
    #[instrument(skip(self))]
    pub async fn get_latest_buy_market_price(
        &self,
        coin: &str,
        market: &str,
    ) -> RestResult<LatestBuySellPriceResponse> {
        self.dispatcher
            .get(&format!("/buyprice/{}/{}", coin, market))
            .await
    }

    /// Latest sell rate for one coin
    #[instrument(skip(self))]
    pub async fn get_latest_sell_price(&self, coin: &str) -> RestResult<LatestBuySellPriceResponse> {
        self.dispatcher.get(&format!("/sellprice/{}", coin)).await
    }

    /// Latest sell rate for one coin in another market
    #[instrument(skip(self))]
    pub async fn get_latest_sell_market_price(
        &self,
        coin: &str,
        market: &str,
    ) -> RestResult<LatestBuySellPriceResponse> {
        self.dispatcher
            .get(&format!("/sellprice/{}/{}", coin, market))
            .await
    }

    /// Open buy and sell orders for one coin
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, coin: &str) -> RestResult<OpenOrdersResponse> {
        self.dispatcher.get(&format!("/orders/open/{}", coin)).await
    }

    /// Open buy and sell orders for one coin in another market
    #[instrument(skip(self))]
    pub async fn get_open_market_orders(
        &self,
        coin: &str,
        market: &str,
    ) -> RestResult<OpenOrdersResponse> {
        self.dispatcher
            .get(&format!("/orders/open/{}/{}", coin, market))
            .await
    }

    /// Completed orders for one coin
    #[instrument(skip(self))]
    pub async fn get_completed_orders(&self, coin: &str) -> RestResult<CompletedOrdersResponse> {
        self.dispatcher
            .get(&format!("/orders/completed/{}", coin))
            .await
    }

    /// Completed orders for one coin in another market
    #[instrument(skip(self))]
    pub async fn get_completed_market_orders(
        &self,
        coin: &str,
        market: &str,
    ) -> RestResult<CompletedOrdersResponse> {
        self.dispatcher
            .get(&format!("/orders/completed/{}/{}", coin, market))
            .await
    }
}
