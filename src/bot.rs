//! Polling loop tying the exchange proxy, strategy and display together

use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::common::errors::{ClientError, Result};
use crate::common::types::{Interval, SetupReport};
use crate::config::types::BotSettings;
use crate::display::balance_table;
use crate::exchange::Exchange;
use crate::strategy::{BoxedStrategy, StrategyContext};

/// Version shown in the balance table title
pub const BOT_VERSION: &str = "1.1.7";

/// Sequential trading loop for one symbol
pub struct Bot {
    exchange: Exchange,
    strategy: BoxedStrategy,
    settings: BotSettings,
    interval: Interval,
}

impl Bot {
    /// Create a bot; fails if the configured timeframe is not a known interval
    pub fn new(exchange: Exchange, strategy: BoxedStrategy, settings: BotSettings) -> Result<Self> {
        let interval = settings.timeframe.parse()?;
        Ok(Self {
            exchange,
            strategy,
            settings,
            interval,
        })
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn version(&self) -> &'static str {
        BOT_VERSION
    }

    /// Configure position mode, margin and leverage for the symbol
    pub async fn startup(&self) -> SetupReport {
        info!(
            "Starting {} strategy on {} ({})",
            self.strategy.name(),
            self.settings.symbol,
            self.exchange.name()
        );
        self.exchange.setup_exchange(&self.settings.symbol).await
    }

    /// Fetch every snapshot the strategy hooks consume
    pub async fn snapshot(&self) -> StrategyContext {
        let symbol = &self.settings.symbol;
        let mut ctx = StrategyContext::new(symbol.clone());

        ctx.balance = self.exchange.get_balance(&self.settings.quote).await;
        ctx.orderbook = self.exchange.get_orderbook(symbol).await;
        ctx.positions = self.exchange.get_positions(symbol).await;
        ctx.price = self.exchange.get_current_price(symbol).await;
        ctx.market_data = self.exchange.get_market_data(symbol).await;
        ctx.moving_averages = self
            .exchange
            .get_moving_averages(symbol, self.interval, self.settings.num_bars)
            .await;
        ctx
    }

    /// One polling step: fetch snapshots, run the strategy hooks, render the balance
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> StrategyContext {
        let ctx = self.snapshot().await;
        debug!(?ctx, "Tick snapshot");

        if let Err(e) = self.strategy.check_orders(&self.exchange, &ctx).await {
            warn!("check_orders failed: {}", e);
        }
        if let Err(e) = self.strategy.position_entry(&self.exchange, &ctx).await {
            warn!("position_entry failed: {}", e);
        }
        if let Err(e) = self.strategy.position_exit(&self.exchange, &ctx).await {
            warn!("position_exit failed: {}", e);
        }

        for line in balance_table(BOT_VERSION, &ctx.balance) {
            println!("{}", line);
        }
        ctx
    }

    /// Run until Ctrl-C or until `max_iterations` ticks have completed
    pub async fn run(&mut self) -> Result<()> {
        self.startup().await;

        let poll = Duration::from_secs(self.settings.poll_interval_seconds);
        let mut completed: u64 = 0;

        loop {
            self.tick().await;
            completed += 1;

            if let Some(max) = self.settings.max_iterations {
                if completed >= max {
                    info!("Completed {} ticks, stopping", completed);
                    break;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(poll) => {}
                result = tokio::signal::ctrl_c() => {
                    result.map_err(|e| ClientError::Internal(e.to_string()))?;
                    info!("Received shutdown signal, stopping");
                    break;
                }
            }
        }

        Ok(())
    }
}
