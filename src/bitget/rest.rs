//! REST API client for Bitget USDT-margined futures market data

use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::auth::{generate_auth_headers, AuthHeaders};
use super::messages::*;
use super::weight::RequestWeight;
use crate::common::errors::{ClientError, Result};
use crate::common::types::{Candle, Interval};
use crate::config::types::{ApiCredentials, BitgetConfig};

/// Default candle interval for kline requests
pub const DEFAULT_KLINE_INTERVAL: Interval = Interval::OneDay;

/// Default candle count for kline requests
pub const DEFAULT_KLINE_LIMIT: u32 = 200;

/// REST API client for Bitget futures
#[derive(Debug, Clone)]
pub struct BitgetRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the futures API
    base_url: String,
    /// Optional API credentials for authenticated endpoints
    credentials: Option<ApiCredentials>,
    /// Request weight counter shared by clones
    weight: Arc<RequestWeight>,
}

impl BitgetRestClient {
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

        info!("Bitget initialised");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            weight: Arc::new(RequestWeight::default()),
        })
    }

    /// Create a client from the `bitget` config section
    pub fn from_config(config: &BitgetConfig, timeout: Duration) -> Result<Self> {
        let client = Self::with_timeout(&config.rest_url, timeout)?;
        Ok(match config.credentials() {
            Some(creds) => client.with_credentials(creds),
            None => client,
        })
    }

    /// Set API credentials for authenticated requests
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Request weight counter
    pub fn weight(&self) -> &RequestWeight {
        &self.weight
    }

    /// Generate authentication headers if credentials are set
    fn auth_headers(&self, method: &str, path: &str, body: &str) -> Result<Option<AuthHeaders>> {
        match &self.credentials {
            Some(creds) => {
                let passphrase = creds.passphrase.as_deref().unwrap_or_default();
                let headers = generate_auth_headers(
                    &creds.api_key,
                    &creds.api_secret,
                    passphrase,
                    method,
                    path,
                    body,
                )?;
                Ok(Some(headers))
            }
            None => Ok(None),
        }
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn path_with_query(path: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            return path.to_string();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();
        format!("{}?{}", path, query)
    }

    async fn send(&self, request_path: &str, signed: bool) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request_path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if signed {
            let headers = self.auth_headers("GET", request_path, "")?.ok_or_else(|| {
                ClientError::Authentication(
                    "API key, secret and passphrase are required".to_string(),
                )
            })?;
            request = headers.apply_to_request(request);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }
        Ok(response)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        signed: bool,
    ) -> Result<Option<T>> {
        let request_path = Self::path_with_query(path, params);
        let response = self.send(&request_path, signed).await?;
        let envelope: BitgetResponse<T> = response.json().await?;
        envelope.into_result()
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// Get tradable contracts keyed by symbol
    #[instrument(skip(self))]
    pub async fn get_futures_symbols(&self) -> Result<BTreeMap<String, ContractSpec>> {
        self.weight.check_weight();
        let contracts: Vec<Contract> = self
            .get_data(
                "/api/mix/v1/market/contracts",
                &[("productType", PRODUCT_TYPE.to_string())],
                false,
            )
            .await?
            .unwrap_or_default();

        let leverages = self.get_max_leverages().await?;

        Ok(contracts
            .iter()
            .filter(|c| c.is_normal())
            .map(|c| {
                let leverage = leverages.get(&c.symbol).copied();
                (c.symbol.clone(), ContractSpec::from_contract(c, leverage))
            })
            .collect())
    }

    /// Get the last price for a symbol
    #[instrument(skip(self))]
    pub async fn get_futures_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        self.weight.check_weight();
        let ticker: Option<Ticker> = self
            .get_data(
                "/api/mix/v1/market/ticker",
                &[("symbol", symbol.to_uppercase())],
                false,
            )
            .await?;
        Ok(ticker.and_then(|t| t.last))
    }

    /// Get last prices for every USDT-margined contract
    #[instrument(skip(self))]
    pub async fn get_futures_prices(&self) -> Result<HashMap<String, Decimal>> {
        self.weight.check_weight();
        let tickers = self.get_tickers().await?;
        Ok(tickers
            .into_iter()
            .filter_map(|t| t.last.map(|last| (t.symbol, last)))
            .collect())
    }

    /// Get 24h USDT volume for every USDT-margined contract
    #[instrument(skip(self))]
    pub async fn get_futures_volumes(&self) -> Result<HashMap<String, Decimal>> {
        self.weight.check_weight();
        let tickers = self.get_tickers().await?;
        Ok(tickers
            .into_iter()
            .filter_map(|t| t.usdt_volume.map(|volume| (t.symbol, volume)))
            .collect())
    }

    async fn get_tickers(&self) -> Result<Vec<Ticker>> {
        Ok(self
            .get_data(
                "/api/mix/v1/market/tickers",
                &[("productType", PRODUCT_TYPE.to_string())],
                false,
            )
            .await?
            .unwrap_or_default())
    }

    /// Get the most recent `limit` candles for a symbol
    ///
    /// Rows that cannot be parsed are skipped.
    #[instrument(skip(self))]
    pub async fn get_futures_kline(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        self.weight.check_weight();
        let end = chrono::Utc::now().timestamp_millis();
        let start = end - interval.seconds() * 1000 * i64::from(limit);
        let request_path = Self::path_with_query(
            "/api/mix/v1/market/candles",
            &[
                ("symbol", symbol.to_uppercase()),
                ("granularity", interval.bitget_code().to_string()),
                ("startTime", start.to_string()),
                ("endTime", end.to_string()),
                ("limit", limit.to_string()),
            ],
        );

        // The candles endpoint answers with a bare array, not an envelope
        let rows: Vec<Vec<Value>> = self.send(&request_path, false).await?.json().await?;
        Ok(rows.iter().filter_map(|row| parse_candle(row)).collect())
    }

    /// Get the last [`DEFAULT_KLINE_LIMIT`] daily candles for a symbol
    pub async fn get_futures_kline_default(&self, symbol: &str) -> Result<Vec<Candle>> {
        self.get_futures_kline(symbol, DEFAULT_KLINE_INTERVAL, DEFAULT_KLINE_LIMIT)
            .await
    }

    /// Get the current funding rate for a symbol
    #[instrument(skip(self))]
    pub async fn get_funding_rate(&self, symbol: &str) -> Result<Option<Decimal>> {
        self.weight.check_weight();
        let rate: Option<FundingRate> = self
            .get_data(
                "/api/mix/v1/market/current-fundRate",
                &[("symbol", symbol.to_uppercase())],
                false,
            )
            .await?;
        Ok(rate.and_then(|r| r.funding_rate))
    }

    /// Get open interest for a symbol
    ///
    /// Holds a single amount when the exchange reports one.
    #[instrument(skip(self))]
    pub async fn get_open_interest(&self, symbol: &str) -> Result<Vec<Decimal>> {
        self.weight.check_weight();
        let interest: Option<OpenInterest> = self
            .get_data(
                "/api/mix/v1/market/open-interest",
                &[("symbol", symbol.to_uppercase())],
                false,
            )
            .await?;
        Ok(interest.and_then(|oi| oi.amount).into_iter().collect())
    }

    // ========================================================================
    // Authenticated Endpoints
    // ========================================================================

    /// Get the max leverage of every contract
    ///
    /// Requires authentication; returns an empty map without credentials.
    #[instrument(skip(self))]
    pub async fn get_max_leverages(&self) -> Result<HashMap<String, Decimal>> {
        if self.credentials.is_none() {
            debug!("No Bitget credentials, skipping max leverage lookup");
            return Ok(HashMap::new());
        }

        let contracts: Vec<Contract> = self
            .get_data(
                "/api/mix/v1/market/contracts",
                &[("productType", PRODUCT_TYPE.to_string())],
                true,
            )
            .await?
            .unwrap_or_default();

        let mut leverages = HashMap::new();
        for contract in contracts {
            if let Some(leverage) = self.get_max_leverage(&contract.symbol).await? {
                leverages.insert(contract.symbol, leverage);
            }
        }
        Ok(leverages)
    }

    /// Get the max leverage for one symbol
    #[instrument(skip(self))]
    pub async fn get_max_leverage(&self, symbol: &str) -> Result<Option<Decimal>> {
        let leverage: Option<SymbolLeverage> = self
            .get_data(
                "/api/mix/v1/market/symbol-leverage",
                &[("symbol", symbol.to_uppercase())],
                true,
            )
            .await?;
        Ok(leverage.and_then(|l| l.max_leverage))
    }
}
