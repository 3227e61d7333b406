// In crates/app-config/src/types.rs

use core_types::{InstrumentConfig, Mode};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the Kite Connect broker API.
    pub kite: KiteSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    /// Telegram notifications are optional; a missing section disables them.
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// SMTP account for the order report; only the `report` command needs it.
    #[serde(default)]
    pub email: EmailSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
    /// The order routing mode at startup. Paper unless configured otherwise.
    #[serde(default)]
    pub default_mode: Mode,
}

#[derive(Deserialize, Debug, Clone)]
pub struct KiteSettings {
    pub api_key: String,
    /// Only needed to exchange a request token for an access token.
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    #[serde(default = "default_ws_base_url")]
    pub ws_base_url: String,
    #[serde(default = "default_exchange")]
    pub exchange: String,
    #[serde(default = "default_product")]
    pub product: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageSettings {
    /// The JSON file holding the order history.
    #[serde(default = "default_orders_path")]
    pub orders_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            orders_path: default_orders_path(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TelegramSettings {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EmailSettings {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// The SMTP login, also used as the sender address.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where the report goes. Defaults to the sender.
    #[serde(default)]
    pub recipient: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            username: String::new(),
            password: String::new(),
            recipient: None,
        }
    }
}

// --- Structs for live.toml Configuration ---

/// The instruments to trade, in file order.
#[derive(Deserialize, Debug, Clone)]
pub struct LiveConfig {
    pub instruments: Vec<InstrumentConfig>,
}

/// Helper functions for serde defaults
fn default_rest_base_url() -> String { "https://api.kite.trade".to_string() }
fn default_ws_base_url() -> String { "wss://ws.kite.trade".to_string() }
fn default_exchange() -> String { "NSE".to_string() }
fn default_product() -> String { "MIS".to_string() }
fn default_port() -> u16 { 5001 }
fn default_orders_path() -> PathBuf { PathBuf::from("orders.json") }
fn default_smtp_host() -> String { "smtp.gmail.com".to_string() }
