use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::errors::ClientError;
use crate::common::types::{Balance, MarketData, MovingAverages, OrderBookTop, Positions};

/// Available strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Hedge,
    Long,
    Short,
    Blackjack,
    ScaleIn,
    Violent,
}

impl StrategyKind {
    /// Every strategy, in CLI listing order
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Hedge,
        StrategyKind::Long,
        StrategyKind::Short,
        StrategyKind::Blackjack,
        StrategyKind::ScaleIn,
        StrategyKind::Violent,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Hedge => "hedge",
            StrategyKind::Long => "long",
            StrategyKind::Short => "short",
            StrategyKind::Blackjack => "blackjack",
            StrategyKind::ScaleIn => "Scale-in",
            StrategyKind::Violent => "violent",
        }
    }

    pub fn version(&self) -> &'static str {
        "0.0.1"
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hedge" => Ok(StrategyKind::Hedge),
            "long" => Ok(StrategyKind::Long),
            "short" => Ok(StrategyKind::Short),
            "blackjack" => Ok(StrategyKind::Blackjack),
            "scale-in" | "scalein" | "scale_in" => Ok(StrategyKind::ScaleIn),
            "violent" => Ok(StrategyKind::Violent),
            _ => Err(ClientError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Snapshots fetched for one polling tick
///
/// Values are zero-filled when the exchange call failed.
#[derive(Debug, Clone, Default)]
pub struct StrategyContext {
    pub symbol: String,
    pub balance: Balance,
    pub orderbook: OrderBookTop,
    pub positions: Positions,
    pub moving_averages: MovingAverages,
    pub market_data: MarketData,
    /// Mid price from the ticker
    pub price: Decimal,
}

impl StrategyContext {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Check if either side holds a position
    pub fn has_position(&self) -> bool {
        self.positions.long.is_open() || self.positions.short.is_open()
    }
}
