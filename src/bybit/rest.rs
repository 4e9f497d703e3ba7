//! REST API client for Bybit USDT perpetual futures

use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

use super::auth::{sign_params, to_query_string};
use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::types::{Interval, OrderSide};
use crate::config::types::ApiCredentials;

/// REST API client for Bybit
#[derive(Debug, Clone)]
pub struct BybitRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the REST API
    base_url: String,
    /// Optional API credentials for private endpoints
    credentials: Option<ApiCredentials>,
}

impl BybitRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Set API credentials for private requests
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns true if private endpoints can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> Result<&ApiCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            ClientError::Authentication("API key and secret are required".to_string())
        })
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let envelope: BybitResponse<T> = response.json().await?;
        envelope.into_result()
    }

    async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: BTreeMap<String, Value>,
    ) -> Result<Option<T>> {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            url = format!("{}?{}", url, to_query_string(&params));
        }
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: BTreeMap<String, Value>,
    ) -> Result<Option<T>> {
        let creds = self.credentials()?;
        let signed = sign_params(
            &creds.api_key,
            &creds.api_secret,
            params,
            chrono::Utc::now().timestamp_millis(),
        )?;
        let url = format!("{}{}?{}", self.base_url, path, signed.query);
        debug!("GET (signed) {}{}", self.base_url, path);

        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    async fn post_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: BTreeMap<String, Value>,
    ) -> Result<Option<T>> {
        let creds = self.credentials()?;
        let signed = sign_params(
            &creds.api_key,
            &creds.api_secret,
            params,
            chrono::Utc::now().timestamp_millis(),
        )?;
        let url = format!("{}{}", self.base_url, path);
        debug!("POST (signed) {}", url);

        let response = self.client.post(&url).json(&signed.params).send().await?;
        Self::parse(response).await
    }

    // ========================================================================
    // Public Endpoints (No Authentication Required)
    // ========================================================================

    /// Get the L2 order book for a symbol
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, symbol: &str) -> Result<Vec<BookLevel>> {
        let params = BTreeMap::from([("symbol".to_string(), Value::from(symbol))]);
        let levels = self.get_public("/v2/public/orderBook/L2", params).await?;
        Ok(levels.unwrap_or_default())
    }

    /// Get the latest ticker for a symbol
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, symbol: &str) -> Result<Option<TickerInfo>> {
        let params = BTreeMap::from([("symbol".to_string(), Value::from(symbol))]);
        let tickers: Option<Vec<TickerInfo>> = self.get_public("/v2/public/tickers", params).await?;
        Ok(tickers
            .unwrap_or_default()
            .into_iter()
            .find(|t| t.symbol == symbol))
    }

    /// Get the most recent `limit` klines for a symbol
    #[instrument(skip(self))]
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<Vec<Kline>> {
        let from = chrono::Utc::now().timestamp() - interval.seconds() * i64::from(limit);
        let params = BTreeMap::from([
            ("symbol".to_string(), Value::from(symbol)),
            ("interval".to_string(), Value::from(interval.bybit_code())),
            ("limit".to_string(), Value::from(limit)),
            ("from".to_string(), Value::from(from)),
        ]);
        let klines = self.get_public("/public/linear/kline", params).await?;
        Ok(klines.unwrap_or_default())
    }

    /// Get all instrument definitions
    #[instrument(skip(self))]
    pub async fn get_symbols(&self) -> Result<Vec<SymbolInfo>> {
        let symbols = self.get_public("/v2/public/symbols", BTreeMap::new()).await?;
        Ok(symbols.unwrap_or_default())
    }

    /// Get the instrument definition for one symbol
    #[instrument(skip(self))]
    pub async fn get_symbol(&self, symbol: &str) -> Result<Option<SymbolInfo>> {
        Ok(self
            .get_symbols()
            .await?
            .into_iter()
            .find(|s| s.name == symbol))
    }

    // ========================================================================
    // Private Endpoints
    // ========================================================================

    /// Get wallet balances, optionally restricted to one coin
    #[instrument(skip(self))]
    pub async fn get_wallet_balance(&self, coin: &str) -> Result<WalletBalances> {
        let params = BTreeMap::from([("coin".to_string(), Value::from(coin))]);
        let balances = self.get_signed("/v2/private/wallet/balance", params).await?;
        Ok(balances.unwrap_or_default())
    }

    /// Get both sides of the position for a symbol
    #[instrument(skip(self))]
    pub async fn get_positions(&self, symbol: &str) -> Result<Vec<LinearPosition>> {
        let params = BTreeMap::from([("symbol".to_string(), Value::from(symbol))]);
        let positions = self
            .get_signed("/private/linear/position/list", params)
            .await?;
        Ok(positions.unwrap_or_default())
    }

    /// Switch between one-way and hedge position mode
    #[instrument(skip(self))]
    pub async fn switch_position_mode(&self, symbol: &str, mode: PositionMode) -> Result<()> {
        let params = BTreeMap::from([
            ("symbol".to_string(), Value::from(symbol)),
            ("mode".to_string(), Value::from(mode.as_str())),
        ]);
        self.post_signed::<Value>("/private/linear/position/switch-mode", params)
            .await?;
        Ok(())
    }

    /// Switch between cross and isolated margin
    #[instrument(skip(self))]
    pub async fn switch_margin_mode(
        &self,
        symbol: &str,
        isolated: bool,
        leverage: Decimal,
    ) -> Result<()> {
        let leverage = decimal_value(leverage);
        let params = BTreeMap::from([
            ("symbol".to_string(), Value::from(symbol)),
            ("is_isolated".to_string(), Value::from(isolated)),
            ("buy_leverage".to_string(), leverage.clone()),
            ("sell_leverage".to_string(), leverage),
        ]);
        self.post_signed::<Value>("/private/linear/position/switch-isolated", params)
            .await?;
        Ok(())
    }

    /// Set leverage for both sides
    #[instrument(skip(self))]
    pub async fn set_leverage(&self, symbol: &str, leverage: Decimal) -> Result<()> {
        let leverage = decimal_value(leverage);
        let params = BTreeMap::from([
            ("symbol".to_string(), Value::from(symbol)),
            ("buy_leverage".to_string(), leverage.clone()),
            ("sell_leverage".to_string(), leverage),
        ]);
        self.post_signed::<Value>("/private/linear/position/set-leverage", params)
            .await?;
        Ok(())
    }

    /// Place a good-till-cancel limit order
    #[instrument(skip(self))]
    pub async fn create_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
        price: Decimal,
    ) -> Result<OrderCreated> {
        let params = BTreeMap::from([
            ("symbol".to_string(), Value::from(symbol)),
            ("side".to_string(), Value::from(side.as_bybit())),
            ("order_type".to_string(), Value::from("Limit")),
            ("qty".to_string(), decimal_value(qty)),
            ("price".to_string(), decimal_value(price)),
            ("time_in_force".to_string(), Value::from("GoodTillCancel")),
            ("reduce_only".to_string(), Value::from(false)),
            ("close_on_trigger".to_string(), Value::from(false)),
        ]);
        self.post_signed("/private/linear/order/create", params)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("Order response had no result".to_string()))
    }
}

/// Bybit expects numeric parameters as JSON numbers
///
/// The number is written in its shortest decimal form so the signed query
/// matches the string the server rebuilds (`25`, never `25.0`).
fn decimal_value(value: Decimal) -> Value {
    value
        .normalize()
        .to_string()
        .parse::<serde_json::Number>()
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
