// In crates/api-client/src/lib.rs

use app_config::types::KiteSettings;
use core_types::{Side, Symbol};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::time::Duration;

pub mod error;
pub mod live_connector;
pub mod telegram;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use live_connector::KiteTicker;
pub use telegram::TelegramNotifier;
pub use types::*;

const KITE_API_VERSION: &str = "3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl KiteClient {
    /// Constructs a new KiteClient from KiteSettings.
    pub fn new(settings: &KiteSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(KiteClient {
            http_client,
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            access_token: settings.access_token.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
            exchange: settings.exchange.clone(),
            product: settings.product.clone(),
        })
    }

    /// The `Authorization` header value for authenticated endpoints.
    fn auth_header(&self) -> String {
        format!("token {}:{}", self.api_key, self.access_token)
    }

    /// Places a regular market order.
    ///
    /// Corresponds to `POST /orders/regular`.
    pub async fn place_market_order(
        &self,
        symbol: &Symbol,
        side: Side,
        quantity: u32,
    ) -> Result<OrderResponse> {
        if self.access_token.is_empty() {
            return Err(Error::NotConfigured("Kite access token"));
        }

        let quantity = quantity.to_string();
        let params = [
            ("exchange", self.exchange.as_str()),
            ("tradingsymbol", symbol.0.as_str()),
            ("transaction_type", side.as_str()),
            ("quantity", quantity.as_str()),
            ("product", self.product.as_str()),
            ("order_type", "MARKET"),
            ("validity", "DAY"),
        ];

        let url = format!("{}/orders/regular", self.base_url);
        let text = self
            .http_client
            .post(&url)
            .header("X-Kite-Version", KITE_API_VERSION)
            .header("Authorization", self.auth_header())
            .form(&params)
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        parse_envelope(&text)
    }

    /// Exchanges the request token from the login redirect for an access token.
    ///
    /// Corresponds to `POST /session/token`.
    pub async fn generate_session(&self, request_token: &str) -> Result<SessionResponse> {
        if self.api_secret.is_empty() {
            return Err(Error::NotConfigured("Kite API secret"));
        }

        let checksum = session_checksum(&self.api_key, request_token, &self.api_secret);
        let params = [
            ("api_key", self.api_key.as_str()),
            ("request_token", request_token),
            ("checksum", checksum.as_str()),
        ];

        let url = format!("{}/session/token", self.base_url);
        let text = self
            .http_client
            .post(&url)
            .header("X-Kite-Version", KITE_API_VERSION)
            .form(&params)
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        parse_envelope(&text)
    }
}

/// `hex(sha256(api_key + request_token + api_secret))`.
pub fn session_checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Unwraps the `data` of a Kite response, turning error envelopes into `Error::ApiError`.
pub fn parse_envelope<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: KiteEnvelope<T> = serde_json::from_str(text)?;

    if envelope.status != "success" {
        return Err(Error::ApiError {
            error_type: envelope.error_type.unwrap_or_else(|| "UnknownException".to_string()),
            message: envelope.message.unwrap_or_default(),
        });
    }

    envelope.data.ok_or_else(|| Error::ApiError {
        error_type: "DataException".to_string(),
        message: "response carried no data".to_string(),
    })
}

// Free function to allow api_client::new usage
pub fn new(settings: &KiteSettings) -> Result<KiteClient> {
    KiteClient::new(settings)
}
