//! Configuration types

use serde::{Deserialize, Serialize};

use crate::exchange::proxy::{DEFAULT_MA_BARS, DEFAULT_MA_INTERVAL};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exchange the bot trades on
    pub exchange: ExchangeConfig,
    /// Bitget market-data configuration
    #[serde(default)]
    pub bitget: BitgetConfig,
    /// Logger settings
    #[serde(default)]
    pub logger: LoggerConfig,
    /// Trading loop settings
    #[serde(default)]
    pub bot: BotSettings,
}

/// Trading exchange configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Exchange name (only "bybit" is implemented)
    pub name: String,
    /// API key for authenticated requests
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Base URL for the REST API
    #[serde(default = "default_bybit_rest_url")]
    pub rest_url: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            name: "bybit".to_string(),
            api_key: None,
            api_secret: None,
            rest_url: default_bybit_rest_url(),
        }
    }
}

impl ExchangeConfig {
    /// Credentials, when both key and secret are present
    pub fn credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some(ApiCredentials::new(key.clone(), secret.clone(), None))
            }
            _ => None,
        }
    }
}

fn default_bybit_rest_url() -> String {
    "https://api.bybit.com".to_string()
}

/// Bitget platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitgetConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
    /// Base URL for the futures REST API
    #[serde(default = "default_bitget_rest_url")]
    pub rest_url: String,
}

impl Default for BitgetConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            passphrase: None,
            rest_url: default_bitget_rest_url(),
        }
    }
}

impl BitgetConfig {
    /// Credentials, when key, secret and passphrase are all present
    pub fn credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret, &self.passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Some(ApiCredentials::new(
                key.clone(),
                secret.clone(),
                Some(passphrase.clone()),
            )),
            _ => None,
        }
    }
}

fn default_bitget_rest_url() -> String {
    "https://api.bitget.com".to_string()
}

/// Logger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Trading loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Futures symbol to trade
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Quote coin used for balance lookups
    #[serde(default = "default_quote")]
    pub quote: String,
    /// Candle timeframe used for moving averages
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    /// Number of candles fetched for moving averages
    #[serde(default = "default_num_bars")]
    pub num_bars: u32,
    /// Delay between polling ticks in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Stop after this many ticks (None = run until Ctrl-C)
    #[serde(default)]
    pub max_iterations: Option<u64>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            quote: default_quote(),
            timeframe: default_timeframe(),
            num_bars: default_num_bars(),
            poll_interval_seconds: default_poll_interval(),
            max_iterations: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_quote() -> String {
    "USDT".to_string()
}

fn default_timeframe() -> String {
    DEFAULT_MA_INTERVAL.to_string()
}

fn default_num_bars() -> u32 {
    DEFAULT_MA_BARS
}

fn default_poll_interval() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

/// API credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
    /// Required by Bitget, unused by Bybit
    pub passphrase: Option<String>,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String, passphrase: Option<String>) -> Self {
        Self {
            api_key,
            api_secret,
            passphrase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"exchange": {"name": "bybit"}}"#).unwrap();

        assert_eq!(config.exchange.rest_url, "https://api.bybit.com");
        assert_eq!(config.bitget.rest_url, "https://api.bitget.com");
        assert_eq!(config.logger.level, "info");
        assert_eq!(config.bot.symbol, "BTCUSDT");
        assert_eq!(config.bot.num_bars, 20);
        assert!(config.bot.max_iterations.is_none());
        assert!(config.exchange.credentials().is_none());
    }

    #[test]
    fn test_bot_defaults_follow_moving_average_defaults() {
        let settings = BotSettings::default();
        let interval: crate::common::types::Interval = settings.timeframe.parse().unwrap();

        assert_eq!(interval, DEFAULT_MA_INTERVAL);
        assert_eq!(settings.timeframe, "1m");
        assert_eq!(settings.num_bars, DEFAULT_MA_BARS);
    }

    #[test]
    fn test_credentials_require_key_and_secret() {
        let mut exchange = ExchangeConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(exchange.credentials().is_none());

        exchange.api_secret = Some("secret".to_string());
        let creds = exchange.credentials().unwrap();
        assert_eq!(creds.api_key, "key");
        assert!(creds.passphrase.is_none());

        let bitget = BitgetConfig {
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(bitget.credentials().is_none());
    }
}
