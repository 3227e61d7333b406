// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;
use std::fmt;

/// The main client for the Kite Connect REST API.
#[derive(Clone)]
pub struct KiteClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    /// The base URL for the REST API (e.g., "https://api.kite.trade").
    pub base_url: String,
    /// The exchange orders are routed to (e.g., "NSE").
    pub exchange: String,
    /// The product type of placed orders (e.g., "MIS" for intraday).
    pub product: String,
}

// Credentials stay out of logs.
impl fmt::Debug for KiteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KiteClient")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("exchange", &self.exchange)
            .field("product", &self.product)
            .finish()
    }
}

/// The envelope wrapping every Kite Connect response.
///
/// Success: `{"status": "success", "data": {...}}`.
/// Failure: `{"status": "error", "error_type": "...", "message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct KiteEnvelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub error_type: Option<String>,
    pub message: Option<String>,
}

/// The `data` payload of a successful order placement.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrderResponse {
    pub order_id: String,
}

/// The `data` payload of a successful session exchange.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub user_id: Option<String>,
}
