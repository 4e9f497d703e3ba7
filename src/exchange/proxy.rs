//! Exchange proxy delegating to the venue's REST client
//!
//! Every accessor comes in two flavours: `try_*` propagates errors, while
//! the plain `get_*` form logs a warning and returns the zero-filled default.

use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::indicators::moving_averages;
use crate::bybit::messages::{BookLevel, CoinBalance, LinearPosition, OrderCreated, PositionMode};
use crate::bybit::BybitRestClient;
use crate::common::errors::{ClientError, Result};
use crate::common::types::{
    Balance, Candle, Interval, MarketData, MovingAverages, OrderBookTop, OrderSide,
    PositionSnapshot, Positions, SetupReport,
};
use crate::config::types::ExchangeConfig;

/// Default timeframe for moving averages
pub const DEFAULT_MA_INTERVAL: Interval = Interval::OneMinute;

/// Default candle count for moving averages
pub const DEFAULT_MA_BARS: u32 = 20;

/// Initialisation state of the proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    Uninitialised,
    Initialised,
}

/// Thin pass-through layer over the exchange connectivity client
#[derive(Debug, Clone)]
pub struct Exchange {
    name: String,
    status: ExchangeStatus,
    client: Option<BybitRestClient>,
}

impl Exchange {
    /// Create the proxy for the configured exchange
    ///
    /// Unknown exchanges are not an error: the proxy stays uninitialised and
    /// every accessor returns its default.
    pub fn new(config: &ExchangeConfig, timeout: Duration) -> Result<Self> {
        let name = config.name.to_lowercase();
        match name.as_str() {
            "bybit" => {
                let mut client = BybitRestClient::with_timeout(&config.rest_url, timeout)?;
                if let Some(creds) = config.credentials() {
                    client = client.with_credentials(creds);
                }
                Ok(Self::from_client(name, client))
            }
            _ => {
                warn!("{} not implemented yet", config.name);
                Ok(Self {
                    name,
                    status: ExchangeStatus::Uninitialised,
                    client: None,
                })
            }
        }
    }

    /// Wrap an already configured Bybit client
    pub fn from_client(name: impl Into<String>, client: BybitRestClient) -> Self {
        let name = name.into();
        info!("Exchange {} initialised", name);
        Self {
            name,
            status: ExchangeStatus::Initialised,
            client: Some(client),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    fn client(&self) -> Result<&BybitRestClient> {
        self.client
            .as_ref()
            .ok_or_else(|| ClientError::UnsupportedExchange(self.name.clone()))
    }

    // ========================================================================
    // Account setup
    // ========================================================================

    /// Switch to hedge mode, cross margin and the instrument's max leverage
    ///
    /// Each step is attempted independently.
    #[instrument(skip(self))]
    pub async fn setup_exchange(&self, symbol: &str) -> SetupReport {
        let mut report = SetupReport::default();
        let market_data = self.get_market_data(symbol).await;

        match self.try_set_position_mode(symbol).await {
            Ok(()) => report.position = true,
            Err(e) => warn!("set_position_mode failed: {}", e),
        }
        match self.try_set_cross_margin(symbol, market_data.leverage).await {
            Ok(()) => report.margin = true,
            Err(e) => warn!("set_margin_mode failed: {}", e),
        }
        match self.try_set_leverage(symbol, market_data.leverage).await {
            Ok(()) => report.leverage = true,
            Err(e) => warn!("set_leverage failed: {}", e),
        }

        info!(?report, "Exchange setup for {}", symbol);
        report
    }

    pub async fn try_set_position_mode(&self, symbol: &str) -> Result<()> {
        self.client()?
            .switch_position_mode(symbol, PositionMode::BothSide)
            .await
    }

    /// Both calls carry the leverage, so neither is sent without a known one
    pub async fn try_set_cross_margin(&self, symbol: &str, leverage: Decimal) -> Result<()> {
        require_leverage(symbol, leverage)?;
        self.client()?
            .switch_margin_mode(symbol, false, leverage)
            .await
    }

    pub async fn try_set_leverage(&self, symbol: &str, leverage: Decimal) -> Result<()> {
        require_leverage(symbol, leverage)?;
        self.client()?.set_leverage(symbol, leverage).await
    }

    // ========================================================================
    // Market data
    // ========================================================================

    /// Price scale, max leverage and minimum quantity for a symbol
    pub async fn get_market_data(&self, symbol: &str) -> MarketData {
        or_default("get_market_data", self.try_market_data(symbol).await)
    }

    pub async fn try_market_data(&self, symbol: &str) -> Result<MarketData> {
        let info = self.client()?.get_symbol(symbol).await?;
        Ok(info
            .map(|info| MarketData {
                precision: info.price_scale.unwrap_or_default(),
                leverage: info
                    .leverage_filter
                    .and_then(|f| f.max_leverage)
                    .unwrap_or_default(),
                min_qty: info
                    .lot_size_filter
                    .and_then(|f| f.min_trading_qty)
                    .unwrap_or_default(),
            })
            .unwrap_or_default())
    }

    /// Wallet balance for the quote coin
    pub async fn get_balance(&self, quote: &str) -> Balance {
        or_default("get_balance", self.try_balance(quote).await)
    }

    pub async fn try_balance(&self, quote: &str) -> Result<Balance> {
        let balances = self.client()?.get_wallet_balance(quote).await?;
        Ok(balances.get(quote).map(balance_from_coin).unwrap_or_default())
    }

    /// Best bid and ask
    pub async fn get_orderbook(&self, symbol: &str) -> OrderBookTop {
        or_default("get_orderbook", self.try_orderbook(symbol).await)
    }

    pub async fn try_orderbook(&self, symbol: &str) -> Result<OrderBookTop> {
        let levels = self.client()?.get_order_book(symbol).await?;
        Ok(top_of_book(&levels))
    }

    /// Long and short position snapshots
    pub async fn get_positions(&self, symbol: &str) -> Positions {
        or_default("get_positions", self.try_positions(symbol).await)
    }

    pub async fn try_positions(&self, symbol: &str) -> Result<Positions> {
        let records = self.client()?.get_positions(symbol).await?;
        Ok(positions_from_records(&records))
    }

    /// Mid of the ticker's best bid and ask
    pub async fn get_current_price(&self, symbol: &str) -> Decimal {
        or_default("get_current_price", self.try_current_price(symbol).await)
    }

    pub async fn try_current_price(&self, symbol: &str) -> Result<Decimal> {
        let ticker = self.client()?.get_ticker(symbol).await?;
        Ok(ticker
            .and_then(|t| match (t.bid_price, t.ask_price) {
                (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
                _ => None,
            })
            .unwrap_or_default())
    }

    /// MA3/MA6 of highs and lows over the last `num_bars` candles
    pub async fn get_moving_averages(
        &self,
        symbol: &str,
        interval: Interval,
        num_bars: u32,
    ) -> MovingAverages {
        or_default(
            "get_moving_averages",
            self.try_moving_averages(symbol, interval, num_bars).await,
        )
    }

    pub async fn try_moving_averages(
        &self,
        symbol: &str,
        interval: Interval,
        num_bars: u32,
    ) -> Result<MovingAverages> {
        let candles = self
            .client()?
            .get_klines(symbol, interval, num_bars)
            .await?
            .into_iter()
            .map(|k| Candle {
                timestamp: k.open_time * 1000,
                open: k.open,
                high: k.high,
                low: k.low,
                close: k.close,
                volume: k.volume,
            })
            .collect::<Vec<_>>();
        Ok(moving_averages(&candles))
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Place a limit order; `side` must be "buy" or "sell"
    pub async fn create_limit_order(
        &self,
        symbol: &str,
        side: &str,
        qty: Decimal,
        price: Decimal,
    ) -> Option<OrderCreated> {
        let side: OrderSide = match side.parse() {
            Ok(side) => side,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };

        match self.try_create_limit_order(symbol, side, qty, price).await {
            Ok(order) => Some(order),
            Err(e) => {
                warn!("create_limit_order failed: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn try_create_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
        price: Decimal,
    ) -> Result<OrderCreated> {
        let order = self
            .client()?
            .create_limit_order(symbol, side, qty, price)
            .await?;
        info!("Placed {} limit order {} for {}", side, order.order_id, symbol);
        Ok(order)
    }
}

/// Log a failed call and fall back to the zero-filled default
fn or_default<T: Default>(operation: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} failed: {}", operation, e);
        T::default()
    })
}

fn require_leverage(symbol: &str, leverage: Decimal) -> Result<()> {
    if leverage <= Decimal::ZERO {
        return Err(ClientError::InvalidResponse(format!(
            "No max leverage known for {}",
            symbol
        )));
    }
    Ok(())
}

fn balance_from_coin(coin: &CoinBalance) -> Balance {
    Balance {
        available_balance: coin.available_balance.unwrap_or_default(),
        pnl: coin.realised_pnl.unwrap_or_default(),
        upnl: coin.unrealised_pnl.unwrap_or_default(),
        wallet_balance: coin.wallet_balance.unwrap_or_default().round_dp(2),
        equity: coin.equity.unwrap_or_default().round_dp(2),
    }
}

/// Best bid and ask from L2 levels; zero unless both sides are present
fn top_of_book(levels: &[BookLevel]) -> OrderBookTop {
    let best_bid = levels
        .iter()
        .filter(|l| l.side == "Buy")
        .filter_map(|l| l.price)
        .max();
    let best_ask = levels
        .iter()
        .filter(|l| l.side == "Sell")
        .filter_map(|l| l.price)
        .min();

    match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => OrderBookTop { bid, ask },
        _ => OrderBookTop::default(),
    }
}

fn positions_from_records(records: &[LinearPosition]) -> Positions {
    let mut positions = Positions::default();
    for record in records {
        match record.side.as_str() {
            "Buy" => positions.long = snapshot_from_record(record),
            "Sell" => positions.short = snapshot_from_record(record),
            _ => {}
        }
    }
    positions
}

fn snapshot_from_record(record: &LinearPosition) -> PositionSnapshot {
    let upnl = record.unrealised_pnl.unwrap_or_default().round_dp(4);
    let upnl_pct = match (record.unrealised_pnl, record.position_margin) {
        (Some(pnl), Some(margin)) if !margin.is_zero() => {
            (pnl / margin * Decimal::ONE_HUNDRED).round_dp(4)
        }
        _ => Decimal::ZERO,
    };

    PositionSnapshot {
        qty: record.size.unwrap_or_default(),
        price: record.entry_price.unwrap_or_default(),
        realised: record.realised_pnl.unwrap_or_default().round_dp(4),
        cum_realised: record.cum_realised_pnl.unwrap_or_default().round_dp(4),
        upnl,
        upnl_pct,
        liq_price: record.liq_price.unwrap_or_default(),
        entry_price: record.entry_price.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, side: &str) -> BookLevel {
        BookLevel {
            symbol: Some("BTCUSDT".to_string()),
            price: Some(price),
            size: Some(dec!(1)),
            side: side.to_string(),
        }
    }

    #[test]
    fn test_top_of_book() {
        let levels = vec![
            level(dec!(100.0), "Buy"),
            level(dec!(100.5), "Buy"),
            level(dec!(101.0), "Sell"),
            level(dec!(101.5), "Sell"),
        ];
        let top = top_of_book(&levels);
        assert_eq!(top.bid, dec!(100.5));
        assert_eq!(top.ask, dec!(101.0));
    }

    #[test]
    fn test_one_sided_book_is_zero() {
        let levels = vec![level(dec!(100.0), "Buy")];
        assert_eq!(top_of_book(&levels), OrderBookTop::default());
    }

    #[test]
    fn test_balance_rounding() {
        let coin = CoinBalance {
            wallet_balance: Some(dec!(1000.126)),
            equity: Some(dec!(1002.554)),
            ..Default::default()
        };
        let balance = balance_from_coin(&coin);
        assert_eq!(balance.wallet_balance, dec!(1000.13));
        assert_eq!(balance.equity, dec!(1002.55));
        assert_eq!(balance.upnl, Decimal::ZERO);
    }

    #[test]
    fn test_position_sides_and_pct() {
        let records = vec![
            LinearPosition {
                side: "Buy".to_string(),
                size: Some(dec!(0.5)),
                entry_price: Some(dec!(30000)),
                position_margin: Some(dec!(1500)),
                unrealised_pnl: Some(dec!(15.123456)),
                ..Default::default()
            },
            LinearPosition {
                side: "Sell".to_string(),
                size: Some(dec!(0.2)),
                ..Default::default()
            },
        ];

        let positions = positions_from_records(&records);
        assert_eq!(positions.long.qty, dec!(0.5));
        assert_eq!(positions.long.entry_price, dec!(30000));
        assert_eq!(positions.long.upnl, dec!(15.1235));
        assert_eq!(positions.long.upnl_pct, dec!(1.0082));
        assert_eq!(positions.short.qty, dec!(0.2));
        assert_eq!(positions.short.upnl_pct, Decimal::ZERO);
        assert_eq!(positions.short.liq_price, Decimal::ZERO);
    }

    #[test]
    fn test_require_leverage() {
        assert!(require_leverage("BTCUSDT", dec!(25)).is_ok());
        assert!(matches!(
            require_leverage("BTCUSDT", Decimal::ZERO),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_exchange_returns_defaults() {
        let config = ExchangeConfig {
            name: "kraken".to_string(),
            ..Default::default()
        };
        let exchange = Exchange::new(&config, Duration::from_secs(1)).unwrap();

        assert_eq!(exchange.status(), ExchangeStatus::Uninitialised);
        assert_eq!(exchange.get_balance("USDT").await, Balance::default());
        assert!(matches!(
            exchange.try_orderbook("BTCUSDT").await,
            Err(ClientError::UnsupportedExchange(_))
        ));
        assert!(exchange
            .create_limit_order("BTCUSDT", "buy", dec!(1), dec!(1))
            .await
            .is_none());
    }
}
