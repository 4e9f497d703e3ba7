use async_trait::async_trait;
use tracing::info;

use crate::common::errors::Result;
use crate::exchange::Exchange;
use crate::strategy::types::StrategyContext;

/// Name reported by a strategy that does not override [`Strategy::name`]
pub const UNLOADED_NAME: &str = "Not loaded";

/// Version reported by a strategy that does not override [`Strategy::version`]
pub const UNLOADED_VERSION: &str = "0.0.0";

/// Core strategy trait
///
/// The bot calls the hooks once per polling tick, in the order
/// `check_orders`, `position_entry`, `position_exit`. Each hook receives the
/// exchange proxy for placing orders and a context holding the snapshots
/// fetched for that tick.
///
/// # Example
///
/// ```ignore
/// struct Breakout;
///
/// #[async_trait]
/// impl Strategy for Breakout {
///     fn name(&self) -> &str { "breakout" }
///     fn version(&self) -> &str { "0.1.0" }
///
///     async fn position_entry(&mut self, exchange: &Exchange, ctx: &StrategyContext) -> Result<()> {
///         if ctx.price > ctx.moving_averages.ma_6_high {
///             exchange.create_limit_order(&ctx.symbol, "buy", qty, ctx.orderbook.bid).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Unique identifier for this strategy
    fn name(&self) -> &str {
        UNLOADED_NAME
    }

    fn version(&self) -> &str {
        UNLOADED_VERSION
    }

    /// Announce the strategy in the log
    fn startup_message(&self) {
        info!("Loading {} strategy, version {}", self.name(), self.version());
    }

    /// Review open orders
    async fn check_orders(&mut self, _exchange: &Exchange, _ctx: &StrategyContext) -> Result<()> {
        Ok(())
    }

    /// Decide whether to open or add to a position
    async fn position_entry(&mut self, _exchange: &Exchange, _ctx: &StrategyContext) -> Result<()> {
        Ok(())
    }

    /// Decide whether to reduce or close a position
    async fn position_exit(&mut self, _exchange: &Exchange, _ctx: &StrategyContext) -> Result<()> {
        Ok(())
    }
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn Strategy>;
