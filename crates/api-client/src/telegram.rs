// In crates/api-client/src/telegram.rs

use crate::{Error, Result};
use app_config::types::TelegramSettings;
use async_trait::async_trait;
use core_types::Notifier;
use serde_json::json;
use std::fmt;

const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Sends plain-text messages to one Telegram chat through the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    http_client: reqwest::Client,
    bot_token: Option<String>,
    chat_id: Option<String>,
    base_url: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(crate::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            bot_token: settings.bot_token.clone().filter(|t| !t.is_empty()),
            chat_id: settings.chat_id.clone().filter(|c| !c.is_empty()),
            base_url: TELEGRAM_API_BASE_URL.to_string(),
        })
    }

    /// Both a bot token and a chat id are needed to send anything.
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Corresponds to `POST /bot{token}/sendMessage`.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let (Some(token), Some(chat_id)) = (&self.bot_token, &self.chat_id) else {
            return Err(Error::NotConfigured("Telegram bot"));
        };

        let url = format!("{}/bot{}/sendMessage", self.base_url, token);
        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiError {
                error_type: status.to_string(),
                message,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) {
        if !self.is_configured() {
            tracing::warn!("Telegram bot not configured properly. Skipping message.");
            return;
        }
        if let Err(e) = self.send_message(text).await {
            tracing::error!(error = %e, "Failed to send Telegram message.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_both_token_and_chat() {
        let only_token = TelegramNotifier::new(&TelegramSettings {
            bot_token: Some("123:abc".to_string()),
            chat_id: None,
        })
        .unwrap();
        assert!(!only_token.is_configured());

        let blank_chat = TelegramNotifier::new(&TelegramSettings {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some(String::new()),
        })
        .unwrap();
        assert!(!blank_chat.is_configured());

        let both = TelegramNotifier::new(&TelegramSettings {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("42".to_string()),
        })
        .unwrap();
        assert!(both.is_configured());
        assert!(!format!("{both:?}").contains("123:abc"));
    }

    #[tokio::test]
    async fn unconfigured_send_is_rejected() {
        let notifier = TelegramNotifier::new(&TelegramSettings::default()).unwrap();
        assert!(matches!(
            notifier.send_message("hello").await,
            Err(Error::NotConfigured(_))
        ));
        // Skips quietly rather than failing.
        notifier.notify("hello").await;
    }
}
