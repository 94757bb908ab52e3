use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{config, output};
use crate::error::Result;

/// Validate configuration file without starting the scanner.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": path.display().to_string(),
            "watchlist": config.watches().len(),
            "discovery": config.discovery.enabled,
            "telegram": config.telegram.credentials().is_some(),
            "supabase": config.supabase.resolved().is_some(),
            "sqlite": config.sqlite.enabled,
            "status": "valid",
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Watchlist", config.watches().len());
    output::field("Discovery", config.discovery.enabled);
    output::field("Poll", format!("{}s", config.poll_seconds));
    output::field("Cooldown", format!("{}m", config.cooldown_minutes));
    output::field(
        "Scores",
        format!("alert >= {}, prio >= {}", config.alert_score, config.priority_score),
    );

    if config.telegram.enabled {
        if config.telegram.credentials().is_some() {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but credentials are missing");
            if config.telegram.bot_token.is_none() {
                output::field("Missing", "TELEGRAM_BOT_TOKEN");
            }
            if config.telegram.chat_id.is_none() {
                output::field("Missing", "TELEGRAM_CHAT_ID");
            }
        }
    } else {
        output::field("Telegram", "disabled");
    }

    if config.supabase.enabled {
        if config.supabase.resolved().is_some() {
            output::success("Supabase store configured");
        } else {
            output::warning("Supabase enabled but SUPABASE_URL or SUPABASE_ANON_KEY is missing");
        }
    } else {
        output::field("Supabase", "disabled");
    }
    output::field(
        "SQLite",
        if config.sqlite.enabled {
            config.sqlite.path.as_str()
        } else {
            "disabled"
        },
    );

    output::success("Configuration check complete");

    Ok(())
}
