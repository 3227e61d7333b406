// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{LiveConfig, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/base"))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // e.g. `APP_KITE__ACCESS_TOKEN=...`
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Loads and validates the instrument list from `config/live.toml`.
pub fn load_live_config() -> Result<LiveConfig> {
    load_live_config_from("config/live.toml")
}

pub fn load_live_config_from(path: impl AsRef<Path>) -> Result<LiveConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_live_config(&content)
}

/// Parses an instrument list and rejects it as a whole if any entry is invalid.
pub fn parse_live_config(content: &str) -> Result<LiveConfig> {
    let config: LiveConfig = toml::from_str(content)?;
    core_types::validate_instruments(&config.instruments)?;
    Ok(config)
}
