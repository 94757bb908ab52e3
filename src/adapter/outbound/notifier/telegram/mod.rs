//! Telegram chat delivery.
//!
//! Requires the `telegram` feature to be enabled.

mod sink;

pub use sink::{discover_chat_id, mask_token, TelegramConfig, TelegramSink};
