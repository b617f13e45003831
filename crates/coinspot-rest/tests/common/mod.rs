//! Common test fixtures for integration tests
//!
//! Sample JSON bodies in the shapes returned by CoinSpot API v2

#![allow(dead_code)]

use serde::de::DeserializeOwned;

/// Parse a fixture, panicking with the serde error on failure
pub fn parse<T: DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("fixture failed to decode: {}", e))
}

// =============================================================================
// Public
// =============================================================================

/// `/pubapi/v2/latest`
pub const LATEST_PRICES: &str = r#"{
    "status": "ok",
    "message": "ok",
    "prices": {
        "btc": {"bid": "95123.45", "ask": "95400.00", "last": "95250.10"},
        "eth": {"bid": "5120.5", "ask": "5150.25", "last": "5133.33"},
        "doge": {"bid": "0.41", "ask": "0.4133", "last": "0.4120"}
    }
}"#;

/// `/pubapi/v2/latest/BTC`
pub const LATEST_COIN_PRICE: &str = r#"{
    "status": "ok",
    "message": "ok",
    "prices": {"bid": "95123.45", "ask": "95400.00", "last": "95250.10"}
}"#;

/// `/pubapi/v2/buyprice/BTC`
pub const BUY_PRICE: &str = r#"{
    "status": "ok",
    "message": "ok",
    "rate": "95400.00",
    "market": "BTC/AUD"
}"#;

/// `/pubapi/v2/orders/open/BTC`
pub const OPEN_ORDERS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "buyorders": [
        {"amount": 0.05, "rate": 95123.45, "total": 4756.17, "coin": "BTC", "market": "BTC/AUD"},
        {"amount": 0.2, "rate": 95000, "total": 19000, "coin": "BTC", "market": "BTC/AUD"}
    ],
    "sellorders": [
        {"amount": 0.01, "rate": 95400, "total": 954, "coin": "BTC", "market": "BTC/AUD"}
    ]
}"#;

/// `/pubapi/v2/orders/completed/BTC`
pub const COMPLETED_ORDERS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "buyorders": [
        {"amount": 0.01, "rate": 95300, "total": 953, "coin": "BTC", "market": "BTC/AUD",
         "solddate": "2024-11-20T03:15:42.000Z"}
    ],
    "sellorders": []
}"#;

// =============================================================================
// Read-only
// =============================================================================

/// `/api/v2/ro/my/balances`
pub const MY_BALANCES: &str = r#"{
    "status": "ok",
    "message": "ok",
    "balances": [
        {"AUD": {"balance": 1520.35, "audbalance": 1520.35, "rate": 1}},
        {"BTC": {"balance": 0.0125, "audbalance": 1190.63, "rate": 95250.1}},
        {"ETH": {"balance": 1.5, "audbalance": 7700, "rate": 5133.33}}
    ]
}"#;

/// `/api/v2/ro/my/balance/ETH`
pub const MY_BALANCE: &str = r#"{
    "status": "ok",
    "message": "ok",
    "balance": {"ETH": {"balance": 1.5, "audbalance": 7700, "rate": 5133.33}}
}"#;

/// `/api/v2/ro/my/orders/market/open`
pub const MY_OPEN_ORDERS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "buyorders": [
        {"id": "6747d1a2f0c1", "coin": "BTC", "market": "BTC/AUD", "amount": 0.01,
         "rate": 90000, "total": 900, "created": "2024-11-28T02:10:10.000Z"}
    ],
    "sellorders": []
}"#;

/// `/api/v2/ro/my/orders/limit/open`
pub const MY_LIMIT_ORDERS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "buyorders": [],
    "sellorders": [
        {"id": "6747d1a2f0c2", "coin": "ETH", "rate": 6000, "amount": 0.5,
         "market": "ETH/AUD", "created": "2024-11-28T02:11:00.000Z", "type": "take profit"}
    ]
}"#;

/// `/api/v2/ro/my/orders/completed`
pub const MY_ORDER_HISTORY: &str = r#"{
    "status": "ok",
    "message": "ok",
    "buyorders": [
        {"amount": 0.01, "rate": 95300, "total": 953, "coin": "BTC", "market": "BTC/AUD",
         "solddate": "2024-11-20T03:15:42.000Z", "audfeeExGst": 8.66, "audGst": 0.87,
         "audtotal": 962.53}
    ],
    "sellorders": []
}"#;

/// `/api/v2/ro/my/sendreceive`
pub const SEND_RECEIVE: &str = r#"{
    "status": "ok",
    "message": "ok",
    "sendtransactions": [
        {"timestamp": "2024-10-01T00:00:00.000Z", "amount": 0.5, "coin": "ETH",
         "address": "0x00000000000000000000000000000000000000aa", "aud": 2566.5,
         "sendfee": 0.002, "sendfeeaud": 10.27}
    ],
    "receivetransactions": [
        {"timestamp": "2024-09-01T00:00:00.000Z", "amount": 0.01, "coin": "BTC",
         "from": "bc1qexamplesender", "aud": 950}
    ]
}"#;

/// `/api/v2/ro/my/deposits`
pub const DEPOSITS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "deposits": [
        {"amount": 500, "created": "2024-08-01T00:00:00.000Z", "status": "completed",
         "type": "PayID", "reference": "REF123"}
    ]
}"#;

/// `/api/v2/ro/my/withdrawals`
pub const WITHDRAWALS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "withdrawals": [
        {"amount": 250, "created": "2024-08-15T00:00:00.000Z", "status": "completed"}
    ]
}"#;

/// `/api/v2/ro/my/affiliatepayments`
pub const AFFILIATE_PAYMENTS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "payments": [{"amount": 12.5, "month": "2024-07"}]
}"#;

/// `/api/v2/ro/my/referralpayments`
pub const REFERRAL_PAYMENTS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "payments": [
        {"amount": 0.0001, "coin": "BTC", "audamount": 9.52, "timestamp": "2024-07-02T00:00:00.000Z"}
    ]
}"#;

// =============================================================================
// Full access
// =============================================================================

/// `/api/v2/my/coin/deposit`
pub const DEPOSIT_ADDRESS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "networks": [
        {"name": "Bitcoin", "network": "BTC", "address": "bc1qexampledeposit"},
        {"name": "Lightning", "network": "LIGHTNING", "address": "lnexample", "memo": "4821"}
    ]
}"#;

/// `/api/v2/quote/buy/now`
pub const QUOTE: &str = r#"{"status": "ok", "message": "ok", "rate": 95512.77}"#;

/// `/api/v2/my/buy`
pub const MARKET_ORDER: &str = r#"{
    "status": "ok",
    "message": "ok",
    "coin": "BTC",
    "market": "BTC/AUD",
    "amount": 0.01,
    "rate": 90000,
    "id": "6747d1a2f0c1"
}"#;

/// `/api/v2/my/buy/edit`
pub const EDIT_ORDER: &str = r#"{
    "status": "ok",
    "message": "ok",
    "updated": true,
    "id": "6747d1a2f0c1",
    "coin": "BTC",
    "rate": 90000,
    "newrate": 91000,
    "amount": 0.01,
    "total": 910
}"#;

/// `/api/v2/my/buy/now`
pub const NOW_ORDER: &str = r#"{
    "status": "ok",
    "message": "ok",
    "coin": "BTC",
    "amount": 0.001,
    "market": "BTC/AUD",
    "total": 95.51
}"#;

/// `/api/v2/my/swap/now`
pub const SWAP_NOW: &str = r#"{
    "status": "ok",
    "message": "ok",
    "coin": "ETH",
    "amount": 1,
    "rate": 0.0539,
    "market": "ETH/BTC",
    "total": 0.0539
}"#;

/// `/api/v2/my/coin/withdraw/senddetails`
pub const WITHDRAWAL_DETAILS: &str = r#"{
    "status": "ok",
    "message": "ok",
    "networks": [
        {"network": "ETH", "fee": 0.002, "minsend": 0.01, "default": true},
        {"network": "ARBITRUM", "paymentid": "none", "fee": 0.0002, "minsend": 0.005, "default": false}
    ]
}"#;

/// Body the exchange returns on a rejected request
pub const ERROR_RESPONSE: &str = r#"{"status": "error", "message": "Invalid coin type"}"#;
