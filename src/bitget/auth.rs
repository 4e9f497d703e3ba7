//! Authentication utilities for the Bitget API

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::common::errors::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Generate HMAC-SHA256 signature for API requests
///
/// # Arguments
/// * `secret` - API secret key
/// * `timestamp` - Unix timestamp in milliseconds
/// * `method` - HTTP method (GET, POST, etc.)
/// * `request_path` - API endpoint path, including `?query` for GET requests
/// * `body` - Request body (empty string for GET requests)
pub fn sign_request(
    secret: &str,
    timestamp: i64,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String> {
    let message = format!("{}{}{}{}", timestamp, method.to_uppercase(), request_path, body);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Authentication(format!("Failed to create HMAC: {}", e)))?;
    mac.update(message.as_bytes());
    let result = mac.finalize();

    Ok(BASE64.encode(result.into_bytes()))
}

/// Generate authentication headers for API requests
pub fn generate_auth_headers(
    api_key: &str,
    api_secret: &str,
    passphrase: &str,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<AuthHeaders> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let signature = sign_request(api_secret, timestamp, method, request_path, body)?;

    Ok(AuthHeaders {
        api_key: api_key.to_string(),
        signature,
        timestamp,
        passphrase: passphrase.to_string(),
    })
}

/// Authentication headers for API requests
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp: i64,
    pub passphrase: String,
}

impl AuthHeaders {
    /// Add authentication headers to a reqwest RequestBuilder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("ACCESS-KEY", &self.api_key)
            .header("ACCESS-SIGN", &self.signature)
            .header("ACCESS-TIMESTAMP", self.timestamp.to_string())
            .header("ACCESS-PASSPHRASE", &self.passphrase)
            .header("Content-Type", "application/json")
            .header("locale", "en-US")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_request_format() {
        let result = sign_request(
            "test_secret_key_12345",
            1_700_000_000_000,
            "get",
            "/api/mix/v1/market/symbol-leverage?symbol=BTCUSDT_UMCBL",
            "",
        );

        let signature = result.unwrap();
        // 32 byte digest encodes to 44 base64 characters
        assert_eq!(signature.len(), 44);
        assert!(BASE64.decode(&signature).is_ok());

        // Method case does not change the signature
        let upper = sign_request(
            "test_secret_key_12345",
            1_700_000_000_000,
            "GET",
            "/api/mix/v1/market/symbol-leverage?symbol=BTCUSDT_UMCBL",
            "",
        )
        .unwrap();
        assert_eq!(signature, upper);
    }

    #[test]
    fn test_generate_auth_headers() {
        let headers = generate_auth_headers(
            "test_api_key",
            "test_secret",
            "test_passphrase",
            "GET",
            "/api/mix/v1/market/contracts",
            "",
        )
        .unwrap();

        assert_eq!(headers.api_key, "test_api_key");
        assert_eq!(headers.passphrase, "test_passphrase");
        assert!(headers.timestamp > 1_600_000_000_000);
        assert!(!headers.signature.is_empty());
    }
}
