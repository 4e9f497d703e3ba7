//! Bitget-specific message types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::errors::{ClientError, Result};
use crate::common::types::Candle;

/// Code returned by Bitget on success
pub const SUCCESS_CODE: &str = "00000";

/// USDT-margined perpetual product type
pub const PRODUCT_TYPE: &str = "umcbl";

/// Response envelope shared by Bitget REST endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub request_time: Option<i64>,
    pub data: Option<T>,
}

impl<T> BitgetResponse<T> {
    /// Unwrap the payload, turning a non-success code into an error
    pub fn into_result(self) -> Result<Option<T>> {
        if self.code != SUCCESS_CODE {
            return Err(ClientError::Api {
                code: self.code,
                message: self.msg,
            });
        }
        Ok(self.data)
    }
}

/// Futures contract definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub symbol: String,
    #[serde(default)]
    pub symbol_status: Option<String>,
    /// Number of price decimals, as a string
    #[serde(default)]
    pub price_place: Option<String>,
    /// Price step in units of the last price decimal
    #[serde(default)]
    pub price_end_step: Option<Decimal>,
    #[serde(default)]
    pub min_trade_num: Option<Decimal>,
    #[serde(default)]
    pub size_multiplier: Option<Decimal>,
}

impl Contract {
    /// Contracts open for trading
    pub fn is_normal(&self) -> bool {
        self.symbol_status.as_deref() == Some("normal")
    }

    /// Parsed `pricePlace`, limited to the scales a Decimal can hold
    pub fn price_place(&self) -> Option<u32> {
        self.price_place
            .as_deref()
            .and_then(|p| p.parse().ok())
            .filter(|place| *place <= 28)
    }
}

/// Normalised trading parameters for one contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractSpec {
    pub launch: i64,
    /// `1 / 10^pricePlace`
    pub price_scale: Decimal,
    pub max_leverage: Decimal,
    pub tick_size: Decimal,
    pub min_order_qty: Decimal,
    pub qty_step: Decimal,
}

impl ContractSpec {
    /// Build a spec from a contract definition and its known max leverage
    pub fn from_contract(contract: &Contract, max_leverage: Option<Decimal>) -> Self {
        let price_scale = contract
            .price_place()
            .map(|place| Decimal::new(1, place))
            .unwrap_or_default();
        let tick_size = contract
            .price_end_step
            .map(|step| step * price_scale)
            .unwrap_or_default();

        Self {
            launch: 0,
            price_scale,
            max_leverage: max_leverage.unwrap_or_default(),
            tick_size,
            min_order_qty: contract.min_trade_num.unwrap_or_default(),
            qty_step: contract.size_multiplier.unwrap_or_default(),
        }
    }
}

/// Leverage bounds for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolLeverage {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub min_leverage: Option<Decimal>,
    #[serde(default)]
    pub max_leverage: Option<Decimal>,
}

/// Market ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    #[serde(default)]
    pub last: Option<Decimal>,
    #[serde(default)]
    pub best_bid: Option<Decimal>,
    #[serde(default)]
    pub best_ask: Option<Decimal>,
    /// 24h volume in USDT
    #[serde(default)]
    pub usdt_volume: Option<Decimal>,
}

/// Current funding rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub funding_rate: Option<Decimal>,
}

/// Open interest for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterest {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Convert a raw candle row `[ts, open, high, low, close, baseVolume, ...]`
///
/// Returns `None` for rows that are too short or hold non-numeric values.
pub fn parse_candle(row: &[Value]) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }
    let timestamp = match &row[0] {
        Value::String(s) => s.parse().ok()?,
        Value::Number(n) => n.as_i64()?,
        _ => return None,
    };

    Some(Candle {
        timestamp,
        open: value_to_decimal(&row[1])?,
        high: value_to_decimal(&row[2])?,
        low: value_to_decimal(&row[3])?,
        close: value_to_decimal(&row[4])?,
        volume: value_to_decimal(&row[5])?,
    })
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contract_spec_from_contract() {
        let contract: Contract = serde_json::from_str(
            r#"{
                "symbol": "BTCUSDT_UMCBL",
                "symbolStatus": "normal",
                "pricePlace": "1",
                "priceEndStep": "5",
                "minTradeNum": "0.001",
                "sizeMultiplier": "0.001"
            }"#,
        )
        .unwrap();

        assert!(contract.is_normal());
        let spec = ContractSpec::from_contract(&contract, Some(dec!(125)));
        assert_eq!(spec.price_scale, dec!(0.1));
        assert_eq!(spec.tick_size, dec!(0.5));
        assert_eq!(spec.max_leverage, dec!(125));
        assert_eq!(spec.min_order_qty, dec!(0.001));
        assert_eq!(spec.launch, 0);
    }

    #[test]
    fn test_parse_candle() {
        let row: Vec<Value> = serde_json::from_str(
            r#"["1700000000000", "35000.5", "35100", "34900", "35050.5", "12.5", "437500"]"#,
        )
        .unwrap();

        let candle = parse_candle(&row).unwrap();
        assert_eq!(candle.timestamp, 1_700_000_000_000);
        assert_eq!(candle.high, dec!(35100));
        assert_eq!(candle.volume, dec!(12.5));

        assert!(parse_candle(&row[..3]).is_none());
    }

    #[test]
    fn test_error_envelope() {
        let response: BitgetResponse<Vec<Contract>> =
            serde_json::from_str(r#"{"code": "40034", "msg": "Parameter does not exist", "data": null}"#)
                .unwrap();
        assert!(matches!(
            response.into_result(),
            Err(ClientError::Api { .. })
        ));
    }
}
