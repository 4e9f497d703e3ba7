//! Request signing for the Bybit API

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use std::collections::BTreeMap;

use crate::common::errors::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Receive window sent with every signed request, in milliseconds
pub const RECV_WINDOW: u64 = 5000;

/// Generate the hex encoded HMAC-SHA256 signature of a query string
pub fn sign_query(secret: &str, query: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Authentication(format!("Failed to create HMAC: {}", e)))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Render parameters as `k=v&k2=v2` in key order
///
/// Strings are written without quotes so the signed payload matches
/// what the server reconstructs from the request.
pub fn to_query_string(params: &BTreeMap<String, Value>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        match value {
            Value::String(s) => serializer.append_pair(key, s),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    serializer.finish()
}

/// A parameter set with `api_key`, `timestamp`, `recv_window` and `sign` filled in
#[derive(Debug, Clone)]
pub struct SignedParams {
    /// Query string including the signature (for GET requests)
    pub query: String,
    /// All parameters including the signature (for POST bodies)
    pub params: BTreeMap<String, Value>,
}

/// Add authentication fields to `params` and sign them
pub fn sign_params(
    api_key: &str,
    api_secret: &str,
    mut params: BTreeMap<String, Value>,
    timestamp_ms: i64,
) -> Result<SignedParams> {
    params.insert("api_key".to_string(), Value::String(api_key.to_string()));
    params.insert("timestamp".to_string(), Value::from(timestamp_ms));
    params.insert("recv_window".to_string(), Value::from(RECV_WINDOW));

    let unsigned = to_query_string(&params);
    let signature = sign_query(api_secret, &unsigned)?;
    let query = format!("{}&sign={}", unsigned, signature);
    params.insert("sign".to_string(), Value::String(signature));

    Ok(SignedParams { query, params })
}
