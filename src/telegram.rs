//! Telegram relay
//!
//! Sends formatted messages to a chat via the Bot API `sendMessage` call.

use crate::config::TelegramCredentials;
use crate::error::{Error, Result};
use crate::format::OutboundMessage;
use async_trait::async_trait;

/// Destination for formatted webhook messages.
///
/// The HTTP handlers depend on this trait rather than on the concrete
/// Telegram client, so tests can observe relay calls without a network.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs
    fn name(&self) -> &str;

    /// Deliver one message
    async fn send(&self, message: OutboundMessage) -> Result<()>;
}

/// Telegram Bot API notifier
pub struct TelegramNotifier {
    credentials: TelegramCredentials,
    disable_web_page_preview: bool,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a notifier for the given credentials
    pub fn new(credentials: TelegramCredentials, disable_web_page_preview: bool) -> Self {
        Self {
            credentials,
            disable_web_page_preview,
            client: reqwest::Client::new(),
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.credentials.bot_token
        )
    }

    /// Form fields for one `sendMessage` call
    fn form_params(&self, message: &OutboundMessage) -> Vec<(&'static str, String)> {
        vec![
            ("chat_id", self.credentials.chat_id.clone()),
            ("text", message.text.clone()),
            ("parse_mode", message.parse_mode.as_api_value().to_string()),
            (
                "disable_web_page_preview",
                self.disable_web_page_preview.to_string(),
            ),
        ]
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: OutboundMessage) -> Result<()> {
        tracing::debug!(
            chat_id = %self.credentials.chat_id,
            "Sending message to Telegram"
        );

        let response = self
            .client
            .post(self.send_message_url())
            .form(&self.form_params(&message))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Telegram(format!(
                "Telegram API returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
