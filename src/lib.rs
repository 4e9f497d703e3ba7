//! DirectionalScalper Library
//!
//! Building blocks for a crypto futures trading bot: a Bybit-backed exchange
//! proxy, Bitget market-data fetchers, strategy scaffolding and a console
//! balance table.

pub mod bitget;
pub mod bot;
pub mod bybit;
pub mod common;
pub mod config;
pub mod display;
pub mod exchange;
pub mod strategy;

// Re-export commonly used types
pub use bitget::BitgetRestClient;
pub use bot::{Bot, BOT_VERSION};
pub use bybit::BybitRestClient;
pub use common::errors::{ClientError, Result};
pub use common::types::{
    Balance, Candle, Interval, MarketData, MovingAverages, OrderBookTop, OrderSide,
    PositionSnapshot, Positions, SetupReport,
};
pub use config::types::AppConfig;
pub use exchange::{Exchange, ExchangeStatus};
pub use strategy::{load_strategy, BoxedStrategy, Strategy, StrategyContext, StrategyKind};
