//! Common test utilities and fixtures

#![allow(dead_code)]

use directional_scalper::bitget::BitgetRestClient;
use directional_scalper::bybit::BybitRestClient;
use directional_scalper::config::types::ApiCredentials;
use directional_scalper::exchange::Exchange;
use std::path::PathBuf;

/// Bybit proxy pointed at a mock server, with credentials for private calls
pub fn bybit_exchange(base_url: &str) -> Exchange {
    let client = BybitRestClient::new(base_url)
        .expect("Failed to create REST client")
        .with_credentials(ApiCredentials::new(
            "test_key".to_string(),
            "test_secret".to_string(),
            None,
        ));
    Exchange::from_client("bybit", client)
}

/// Bitget client pointed at a mock server
pub fn bitget_client(base_url: &str, authenticated: bool) -> BitgetRestClient {
    let client = BitgetRestClient::new(base_url).expect("Failed to create REST client");
    if authenticated {
        client.with_credentials(ApiCredentials::new(
            "test_key".to_string(),
            "test_secret".to_string(),
            Some("test_passphrase".to_string()),
        ))
    } else {
        client
    }
}

/// Write a JSON config file into a fresh temp directory and return its path
pub fn write_config(test_name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "ds-tests-{}-{}",
        std::process::id(),
        test_name
    ));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join("config.json");
    std::fs::write(&path, contents).expect("Failed to write config");
    path
}

/// Write `config/<file_name>` under a fresh temp directory and return that directory
pub fn write_config_dir(test_name: &str, file_name: &str, contents: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "ds-tests-{}-{}",
        std::process::id(),
        test_name
    ));
    let dir = root.join("config");
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    std::fs::write(dir.join(file_name), contents).expect("Failed to write config");
    root
}

/// Minimal bot configuration against the given Bybit base URL
pub fn bybit_config_json(rest_url: &str) -> String {
    format!(
        r#"{{
            "exchange": {{"name": "bybit", "rest_url": "{}"}},
            "logger": {{"level": "warn"}},
            "bot": {{"symbol": "BTCUSDT", "quote": "USDT", "poll_interval_seconds": 1}}
        }}"#,
        rest_url
    )
}

/// Sample Bybit API responses
pub mod bybit_responses {
    pub const WALLET_BALANCE: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": {
            "USDT": {
                "equity": 1002.5561,
                "available_balance": 998.25,
                "wallet_balance": 1000.1234,
                "realised_pnl": 1.5,
                "unrealised_pnl": 2.4327,
                "cum_realised_pnl": 12.75
            }
        },
        "time_now": "1700000000.123456"
    }"#;

    pub const WALLET_BALANCE_OTHER_COIN: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": {"BTC": {"equity": 0.5}}
    }"#;

    pub const WALLET_BALANCE_PARTIAL: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": {"USDT": {"available_balance": 50}}
    }"#;

    pub const ORDER_BOOK: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {"symbol": "BTCUSDT", "price": "27000.5", "size": 1.2, "side": "Buy"},
            {"symbol": "BTCUSDT", "price": "26999", "size": 0.4, "side": "Buy"},
            {"symbol": "BTCUSDT", "price": "27001", "size": 0.8, "side": "Sell"},
            {"symbol": "BTCUSDT", "price": "27002.5", "size": 2.0, "side": "Sell"}
        ]
    }"#;

    pub const ORDER_BOOK_BIDS_ONLY: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {"symbol": "BTCUSDT", "price": "27000.5", "size": 1.2, "side": "Buy"}
        ]
    }"#;

    pub const POSITIONS: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {
                "symbol": "BTCUSDT",
                "side": "Buy",
                "size": 0.01,
                "entry_price": 27000,
                "liq_price": 20000.5,
                "position_margin": 27,
                "realised_pnl": -0.123456,
                "cum_realised_pnl": 3.333333,
                "unrealised_pnl": 0.54
            },
            {
                "symbol": "BTCUSDT",
                "side": "Sell",
                "size": 0
            }
        ]
    }"#;

    pub const TICKER: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {"symbol": "BTCUSDT", "bid_price": "27000", "ask_price": "27001", "last_price": "27000.5"}
        ]
    }"#;

    pub const TICKER_NO_ASK: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [{"symbol": "BTCUSDT", "bid_price": "27000"}]
    }"#;

    pub const KLINES: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {"open_time": 1700000000, "open": 1, "high": 10, "low": 1, "close": 5, "volume": 100},
            {"open_time": 1700000060, "open": 1, "high": 20, "low": 2, "close": 5, "volume": 100},
            {"open_time": 1700000120, "open": 1, "high": 30, "low": 3, "close": 5, "volume": 100},
            {"open_time": 1700000180, "open": 1, "high": 40, "low": 4, "close": 5, "volume": 100},
            {"open_time": 1700000240, "open": 1, "high": 50, "low": 5, "close": 5, "volume": 100},
            {"open_time": 1700000300, "open": 1, "high": 60, "low": 6, "close": 5, "volume": 100}
        ]
    }"#;

    pub const SYMBOLS: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": [
            {
                "name": "BTCUSDT",
                "price_scale": 2,
                "leverage_filter": {"min_leverage": 1, "max_leverage": 100},
                "lot_size_filter": {"min_trading_qty": 0.001, "max_trading_qty": 100, "qty_step": 0.001},
                "price_filter": {"tick_size": "0.5"}
            },
            {"name": "ETHUSDT", "price_scale": 2}
        ]
    }"#;

    pub const EMPTY_OK: &str = r#"{"ret_code": 0, "ret_msg": "OK", "result": null}"#;

    pub const NOT_MODIFIED: &str =
        r#"{"ret_code": 130056, "ret_msg": "Isolated not modified", "result": null}"#;

    pub const ORDER_CREATED: &str = r#"{
        "ret_code": 0,
        "ret_msg": "OK",
        "result": {
            "order_id": "335fd977-e5a5-4781-b6d0-c772d5bfb95b",
            "symbol": "BTCUSDT",
            "side": "Buy",
            "price": 26000,
            "qty": 0.01,
            "order_status": "Created"
        }
    }"#;
}

/// Sample Bitget API responses
pub mod bitget_responses {
    pub const CONTRACTS: &str = r#"{
        "code": "00000",
        "msg": "success",
        "requestTime": 1700000000000,
        "data": [
            {
                "symbol": "BTCUSDT_UMCBL",
                "symbolStatus": "normal",
                "pricePlace": "1",
                "priceEndStep": "5",
                "minTradeNum": "0.001",
                "sizeMultiplier": "0.001"
            },
            {
                "symbol": "LUNAUSDT_UMCBL",
                "symbolStatus": "off",
                "pricePlace": "4"
            }
        ]
    }"#;

    pub const SYMBOL_LEVERAGE: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": {"symbol": "BTCUSDT_UMCBL", "minLeverage": "1", "maxLeverage": "125"}
    }"#;

    pub const TICKER: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": {"symbol": "BTCUSDT_UMCBL", "last": "35000.5", "bestBid": "35000", "bestAsk": "35001"}
    }"#;

    pub const TICKER_EMPTY: &str = r#"{"code": "00000", "msg": "success", "data": null}"#;

    pub const TICKERS: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": [
            {"symbol": "BTCUSDT_UMCBL", "last": "35000.5", "usdtVolume": "1200000"},
            {"symbol": "ETHUSDT_UMCBL", "last": "1850.25"}
        ]
    }"#;

    pub const CANDLES: &str = r#"[
        ["1700000000000", "35000", "35100", "34900", "35050", "12.5", "437500"],
        ["1700086400000", "35050", "35500", "35000", "35400", "8", "283200"],
        ["bad"]
    ]"#;

    pub const FUNDING_RATE: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": {"symbol": "BTCUSDT_UMCBL", "fundingRate": "0.0001"}
    }"#;

    pub const OPEN_INTEREST: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": {"symbol": "BTCUSDT_UMCBL", "amount": "48512.345", "timestamp": "1700000000000"}
    }"#;

    pub const OPEN_INTEREST_EMPTY: &str = r#"{
        "code": "00000",
        "msg": "success",
        "data": {"symbol": "BTCUSDT_UMCBL"}
    }"#;

    pub const ERROR: &str = r#"{"code": "40034", "msg": "Parameter does not exist", "data": null}"#;
}
