//! Telegram delivery configuration.

use serde::Deserialize;

/// Telegram settings (`[telegram]`).
///
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` override the file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<i64>,
}

impl TelegramAppConfig {
    pub(super) fn apply_env(&mut self) -> Result<(), String> {
        if let Some(token) = env_value("TELEGRAM_BOT_TOKEN") {
            self.bot_token = Some(token);
        }
        if let Some(chat_id) = env_value("TELEGRAM_CHAT_ID") {
            let parsed = chat_id
                .parse()
                .map_err(|_| format!("TELEGRAM_CHAT_ID is not an integer: {chat_id}"))?;
            self.chat_id = Some(parsed);
        }
        Ok(())
    }

    /// Token and chat id when Telegram is enabled and fully configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, i64)> {
        if !self.enabled {
            return None;
        }
        Some((self.bot_token.as_deref()?, self.chat_id?))
    }
}

pub(super) fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_enabled_token_and_chat() {
        let mut config = TelegramAppConfig {
            enabled: false,
            bot_token: Some("token".into()),
            chat_id: Some(42),
        };
        assert!(config.credentials().is_none());

        config.enabled = true;
        assert_eq!(config.credentials(), Some(("token", 42)));

        config.chat_id = None;
        assert!(config.credentials().is_none());
    }
}
