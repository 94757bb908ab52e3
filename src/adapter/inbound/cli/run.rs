//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    config::init_logging(&config);

    print_startup_config(&config, args.once);

    bootstrap::run(config, args.once).await
}

fn print_startup_config(config: &Config, once: bool) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Watchlist", config.watches().len());
    output::field(
        "Discovery",
        if config.discovery.enabled {
            format!(
                "top {} every {}s",
                config.discovery.top_n, config.discovery.refresh_seconds
            )
        } else {
            "disabled".to_string()
        },
    );
    output::field("Poll", format!("{}s", config.poll_seconds));
    output::field("Cooldown", format!("{}m", config.cooldown_minutes));
    if output::current().verbose > 0 {
        output::field("Alert score", config.alert_score);
        output::field("Priority", config.priority_score);
        output::field("API", &config.http.api_url);
    }

    if once {
        output::warning("Single-shot mode, exiting after one tick");
    }
    if config.watches().is_empty() && !config.discovery.enabled {
        output::warning("Watchlist is empty and discovery is disabled, nothing to scan");
    }
}
