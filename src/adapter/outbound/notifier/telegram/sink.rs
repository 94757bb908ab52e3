use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::LinkPreviewOptions;
use tracing::{debug, info};

use crate::error::DeliveryError;
use crate::port::outbound::notifier::MessageSink;

/// Resolved Telegram credentials.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for alerts.
    pub chat_id: i64,
}

/// Sends alert text to one Telegram chat, without link previews.
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSink {
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        info!(chat_id = config.chat_id, "Telegram sink enabled");
        Self {
            bot: Bot::new(&config.bot_token),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat_id, text)
            .link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            })
            .await
            .map_err(|e| DeliveryError::Telegram(e.to_string()))?;
        debug!(chat_id = self.chat_id.0, "Telegram message sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Chat of the most recent update the bot has received, if any.
///
/// Lets an operator who has messaged the bot find the chat id to put in
/// the configuration.
///
/// # Errors
///
/// Returns [`DeliveryError::Telegram`] when the Bot API call fails.
pub async fn discover_chat_id(bot_token: &str) -> Result<Option<i64>, DeliveryError> {
    let bot = Bot::new(bot_token);
    let updates = bot
        .get_updates()
        .await
        .map_err(|e| DeliveryError::Telegram(e.to_string()))?;
    Ok(updates
        .iter()
        .rev()
        .find_map(|update| update.chat().map(|chat| chat.id.0)))
}

/// Shorten a bot token for display.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() >= 15 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{head}...{tail}")
    } else {
        let head: String = chars.iter().take(10).collect();
        format!("{head}...")
    }
}
