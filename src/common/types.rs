//! Unified types returned by the exchange layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::ClientError;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Side string as the Bybit API expects it
    pub fn as_bybit(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            _ => Err(ClientError::InvalidOrderSide(s.to_string())),
        }
    }
}

/// Candle interval, mapped onto each venue's own code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    TwelveHours,
    OneDay,
    OneWeek,
}

impl Interval {
    /// Interval length in seconds
    pub fn seconds(&self) -> i64 {
        match self {
            Interval::OneMinute => 60,
            Interval::ThreeMinutes => 180,
            Interval::FiveMinutes => 300,
            Interval::FifteenMinutes => 900,
            Interval::ThirtyMinutes => 1_800,
            Interval::OneHour => 3_600,
            Interval::TwoHours => 7_200,
            Interval::FourHours => 14_400,
            Interval::SixHours => 21_600,
            Interval::TwelveHours => 43_200,
            Interval::OneDay => 86_400,
            Interval::OneWeek => 604_800,
        }
    }

    /// Canonical lowercase name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1w",
        }
    }

    /// Bybit kline `interval` parameter
    pub fn bybit_code(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1",
            Interval::ThreeMinutes => "3",
            Interval::FiveMinutes => "5",
            Interval::FifteenMinutes => "15",
            Interval::ThirtyMinutes => "30",
            Interval::OneHour => "60",
            Interval::TwoHours => "120",
            Interval::FourHours => "240",
            Interval::SixHours => "360",
            Interval::TwelveHours => "720",
            Interval::OneDay => "D",
            Interval::OneWeek => "W",
        }
    }

    /// Bitget candle `granularity` parameter
    pub fn bitget_code(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1H",
            Interval::TwoHours => "2H",
            Interval::FourHours => "4H",
            Interval::SixHours => "6H",
            Interval::TwelveHours => "12H",
            Interval::OneDay => "1D",
            Interval::OneWeek => "1W",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Interval::OneMinute),
            "3m" => Ok(Interval::ThreeMinutes),
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "30m" => Ok(Interval::ThirtyMinutes),
            "1h" => Ok(Interval::OneHour),
            "2h" => Ok(Interval::TwoHours),
            "4h" => Ok(Interval::FourHours),
            "6h" => Ok(Interval::SixHours),
            "12h" => Ok(Interval::TwelveHours),
            "1d" => Ok(Interval::OneDay),
            "1w" => Ok(Interval::OneWeek),
            other => Err(ClientError::Configuration(format!(
                "Unsupported interval: {}",
                other
            ))),
        }
    }
}

/// Account balance snapshot for one quote coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub available_balance: Decimal,
    /// Realised PnL
    pub pnl: Decimal,
    /// Unrealised PnL
    pub upnl: Decimal,
    /// Wallet balance, rounded to 2 decimal places
    pub wallet_balance: Decimal,
    /// Equity, rounded to 2 decimal places
    pub equity: Decimal,
}

impl Balance {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Available balance", self.available_balance.to_string()),
            ("Realised PnL", self.pnl.to_string()),
            ("Unrealised PnL", self.upnl.to_string()),
            ("Wallet balance", self.wallet_balance.to_string()),
            ("Equity", self.equity.to_string()),
        ]
    }
}

/// Top of the order book
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookTop {
    /// Best bid price
    pub bid: Decimal,
    /// Best ask price
    pub ask: Decimal,
}

/// Snapshot of one side (long or short) of a hedged position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub qty: Decimal,
    pub price: Decimal,
    pub realised: Decimal,
    pub cum_realised: Decimal,
    pub upnl: Decimal,
    pub upnl_pct: Decimal,
    pub liq_price: Decimal,
    pub entry_price: Decimal,
}

impl PositionSnapshot {
    /// Returns true if this side holds any quantity
    pub fn is_open(&self) -> bool {
        !self.qty.is_zero()
    }
}

/// Both sides of a position in hedge mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    pub long: PositionSnapshot,
    pub short: PositionSnapshot,
}

/// Instrument trading parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Price scale (number of decimals)
    pub precision: Decimal,
    /// Maximum leverage
    pub leverage: Decimal,
    /// Minimum trading quantity
    pub min_qty: Decimal,
}

/// 3 and 6 period simple moving averages over candle highs and lows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub ma_3_high: Decimal,
    pub ma_3_low: Decimal,
    pub ma_6_high: Decimal,
    pub ma_6_low: Decimal,
}

/// OHLCV candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time in milliseconds since epoch
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Outcome of the account setup calls for a symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupReport {
    /// Hedge position mode enabled
    pub position: bool,
    /// Cross margin enabled
    pub margin: bool,
    /// Leverage set to the instrument maximum
    pub leverage: bool,
}
