//! Bybit-specific message types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::common::errors::{ClientError, Result};

/// Response envelope shared by every Bybit REST endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BybitResponse<T> {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    pub result: Option<T>,
    #[serde(default)]
    pub time_now: Option<String>,
}

impl<T> BybitResponse<T> {
    /// Unwrap the payload, turning a non-zero `ret_code` into an error
    pub fn into_result(self) -> Result<Option<T>> {
        if self.ret_code != 0 {
            return Err(ClientError::Api {
                code: self.ret_code.to_string(),
                message: self.ret_msg,
            });
        }
        Ok(self.result)
    }
}

/// Wallet balance per coin, keyed by coin name
pub type WalletBalances = HashMap<String, CoinBalance>;

/// Balance details for one coin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinBalance {
    #[serde(default)]
    pub equity: Option<Decimal>,
    #[serde(default)]
    pub available_balance: Option<Decimal>,
    #[serde(default)]
    pub wallet_balance: Option<Decimal>,
    #[serde(default)]
    pub realised_pnl: Option<Decimal>,
    #[serde(default)]
    pub unrealised_pnl: Option<Decimal>,
    #[serde(default)]
    pub cum_realised_pnl: Option<Decimal>,
}

/// Level in the L2 order book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLevel {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub size: Option<Decimal>,
    /// "Buy" for bids, "Sell" for asks
    pub side: String,
}

/// One side of a linear (USDT) perpetual position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearPosition {
    #[serde(default)]
    pub symbol: Option<String>,
    /// "Buy" for the long side, "Sell" for the short side
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub liq_price: Option<Decimal>,
    #[serde(default)]
    pub position_margin: Option<Decimal>,
    #[serde(default)]
    pub realised_pnl: Option<Decimal>,
    #[serde(default)]
    pub cum_realised_pnl: Option<Decimal>,
    #[serde(default)]
    pub unrealised_pnl: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
}

/// Latest ticker for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    #[serde(default)]
    pub last_price: Option<Decimal>,
    #[serde(default)]
    pub funding_rate: Option<Decimal>,
}

/// Linear kline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    /// Open time in seconds
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default)]
    pub volume: Decimal,
}

/// Instrument definition from the symbols endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    #[serde(default)]
    pub price_scale: Option<Decimal>,
    #[serde(default)]
    pub leverage_filter: Option<LeverageFilter>,
    #[serde(default)]
    pub lot_size_filter: Option<LotSizeFilter>,
    #[serde(default)]
    pub price_filter: Option<PriceFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeverageFilter {
    #[serde(default)]
    pub min_leverage: Option<Decimal>,
    #[serde(default)]
    pub max_leverage: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotSizeFilter {
    #[serde(default)]
    pub min_trading_qty: Option<Decimal>,
    #[serde(default)]
    pub max_trading_qty: Option<Decimal>,
    #[serde(default)]
    pub qty_step: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFilter {
    #[serde(default)]
    pub tick_size: Option<Decimal>,
}

/// Position mode for linear contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMode {
    /// One position per symbol
    MergedSingle,
    /// Separate long and short positions (hedge mode)
    BothSide,
}

impl PositionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionMode::MergedSingle => "MergedSingle",
            PositionMode::BothSide => "BothSide",
        }
    }
}

/// Acknowledgement of a created order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub qty: Option<Decimal>,
    #[serde(default)]
    pub order_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_wallet_balance() {
        let json = r#"{
            "ret_code": 0,
            "ret_msg": "OK",
            "result": {
                "USDT": {
                    "equity": 1002.5,
                    "available_balance": 998.25,
                    "wallet_balance": 1000.0,
                    "realised_pnl": 1.5,
                    "unrealised_pnl": 2.5
                }
            },
            "time_now": "1700000000.123456"
        }"#;

        let response: BybitResponse<WalletBalances> = serde_json::from_str(json).unwrap();
        let balances = response.into_result().unwrap().unwrap();
        let usdt = &balances["USDT"];
        assert_eq!(usdt.available_balance, Some(dec!(998.25)));
        assert_eq!(usdt.cum_realised_pnl, None);
    }

    #[test]
    fn test_string_prices_parse() {
        let json = r#"{"symbol": "BTCUSDT", "price": "27000.5", "size": 1.25, "side": "Buy"}"#;
        let level: BookLevel = serde_json::from_str(json).unwrap();
        assert_eq!(level.price, Some(dec!(27000.5)));
        assert_eq!(level.size, Some(dec!(1.25)));
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"ret_code": 10003, "ret_msg": "invalid api_key", "result": null}"#;
        let response: BybitResponse<WalletBalances> = serde_json::from_str(json).unwrap();

        match response.into_result() {
            Err(ClientError::Api { code, message }) => {
                assert_eq!(code, "10003");
                assert_eq!(message, "invalid api_key");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
