//! Gitgram configuration management

use crate::error::{Error, Result};
use crate::format::ParseMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main gitgram configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitgramConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram relay configuration
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Message formatting configuration
    #[serde(default)]
    pub format: FormatConfig,
}

impl GitgramConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path the webhook endpoint is mounted at
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            webhook_path: "/github-webhook".to_string(),
        }
    }
}

/// Telegram relay configuration
///
/// Credentials are referenced by environment variable name rather than
/// stored inline, so a checked-in config file never carries the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Environment variable holding the bot token
    pub bot_token_ref: String,

    /// Environment variable holding the destination chat id
    pub chat_id_ref: String,

    /// Destination chat id given inline (takes precedence over the env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,

    /// Suppress link previews in relayed messages
    pub disable_web_page_preview: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token_ref: "TELEGRAM_BOT_TOKEN".to_string(),
            chat_id_ref: "TELEGRAM_CHAT_ID".to_string(),
            chat_id: None,
            disable_web_page_preview: false,
        }
    }
}

/// Resolved Telegram credentials
#[derive(Debug, Clone)]
pub struct TelegramCredentials {
    /// Bot API token
    pub bot_token: String,

    /// Destination chat or channel id
    pub chat_id: String,
}

impl TelegramConfig {
    /// Resolve credentials from the configuration and environment.
    ///
    /// Both the bot token and the chat id must resolve to non-empty
    /// values; an empty destination is a configuration error.
    pub fn resolve(&self) -> Result<TelegramCredentials> {
        let bot_token = resolve_env(&self.bot_token_ref)?;
        let chat_id = match &self.chat_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => resolve_env(&self.chat_id_ref)?,
        };

        Ok(TelegramCredentials { bot_token, chat_id })
    }
}

/// Read a required, non-empty environment variable
fn resolve_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "Required environment variable {} is not set",
            var
        ))),
    }
}

/// Message formatting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Telegram markup mode for relayed messages
    pub parse_mode: ParseMode,

    /// Display name shown as the acting user.
    ///
    /// When unset, the `sender.login` reported in the payload is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,

    /// Profile URL the actor name links to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_url: Option<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Markdown,
            actor_name: None,
            actor_url: None,
        }
    }
}
