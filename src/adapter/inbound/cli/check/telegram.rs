use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{config, output};
#[cfg(feature = "telegram")]
use crate::infrastructure::config::telegram::TelegramAppConfig;
use crate::error::{DeliveryError, Result};

/// Chat the test message is sent to.
#[cfg(feature = "telegram")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatTarget {
    Configured(i64),
    /// Chat of the latest update the bot received.
    Discovered(i64),
    Unknown,
}

#[cfg(feature = "telegram")]
impl ChatTarget {
    const fn resolve(configured: Option<i64>, discovered: Option<i64>) -> Self {
        match (configured, discovered) {
            (Some(id), _) => Self::Configured(id),
            (None, Some(id)) => Self::Discovered(id),
            (None, None) => Self::Unknown,
        }
    }

    const fn chat_id(self) -> Option<i64> {
        match self {
            Self::Configured(id) | Self::Discovered(id) => Some(id),
            Self::Unknown => None,
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Configured(_) => "configured",
            Self::Discovered(_) => "discovered",
            Self::Unknown => "unknown",
        }
    }
}

/// Bot token, if `run` would deliver through Telegram at all.
#[cfg(feature = "telegram")]
fn usable_token(telegram: &TelegramAppConfig) -> std::result::Result<&str, DeliveryError> {
    if !telegram.enabled {
        return Err(DeliveryError::Disabled("telegram"));
    }
    telegram
        .bot_token
        .as_deref()
        .ok_or(DeliveryError::NotConfigured("telegram bot token"))
}

/// Test Telegram delivery by sending one message.
///
/// With a token but no chat id, the chat of the latest update the bot
/// received is used and printed so it can be added to the config.
#[cfg(feature = "telegram")]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P, message: &str) -> Result<()> {
    use crate::adapter::outbound::notifier::telegram::{
        discover_chat_id, mask_token, TelegramConfig, TelegramSink,
    };
    use crate::port::outbound::notifier::MessageSink;

    let config = config::load(config_path.as_ref())?;
    let bot_token = match usable_token(&config.telegram) {
        Ok(token) => token.to_string(),
        Err(err @ DeliveryError::Disabled(_)) => {
            output::hint("set telegram.enabled = true; until then `run` only logs alerts");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    let masked = mask_token(&bot_token);

    if !output::is_json() {
        output::section("Telegram Check");
    }
    let discovered = if config.telegram.chat_id.is_none() {
        if !output::is_json() {
            output::action("Discovering", "chat id from recent updates");
        }
        discover_chat_id(&bot_token).await?
    } else {
        None
    };
    let target = ChatTarget::resolve(config.telegram.chat_id, discovered);

    let Some(chat_id) = target.chat_id() else {
        if output::is_json() {
            output::json_output(json!({
                "command": "check.telegram",
                "masked_token": masked,
                "chat_id": null,
                "status": "no_chat",
            }));
            return Ok(());
        }
        output::field("Bot token", &masked);
        output::warning("No updates found for this bot");
        output::hint("send any message to the bot, then run this check again");
        return Ok(());
    };

    if !output::is_json() {
        output::field("Bot token", &masked);
        output::field("Chat ID", chat_id);
        if let ChatTarget::Discovered(_) = target {
            output::hint("set TELEGRAM_CHAT_ID or telegram.chat_id to this value");
        }
        output::action("Sending", "Telegram test message");
    }
    let sink = TelegramSink::new(&TelegramConfig { bot_token, chat_id });
    sink.deliver(message).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.telegram",
            "masked_token": masked,
            "chat_id": chat_id,
            "chat_source": target.source(),
            "status": "sent",
        }));
        return Ok(());
    }

    output::success("Sent Telegram test message");
    output::hint("check Telegram for the message");

    Ok(())
}

/// Telegram support is compiled out.
#[cfg(not(feature = "telegram"))]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P, _message: &str) -> Result<()> {
    config::load(config_path.as_ref())?;
    if output::is_json() {
        output::json_output(json!({
            "command": "check.telegram",
            "status": "unavailable",
        }));
    }
    Err(DeliveryError::NotConfigured("telegram feature").into())
}
