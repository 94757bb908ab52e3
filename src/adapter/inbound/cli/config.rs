//! Config file loading for CLI handlers.

use std::path::Path;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load `path`, falling back to `config.example.toml` next to it when
/// `path` does not exist.
///
/// # Errors
///
/// Returns the load or validation error of the chosen file.
#[allow(clippy::result_large_err)]
pub fn load(path: &Path) -> Result<Config> {
    let (resolved, fallback) = Config::resolve_path(path);
    if fallback {
        output::warning(&format!(
            "{} not found, using {}",
            path.display(),
            resolved.display()
        ));
    }
    Config::load(&resolved)
}

/// Apply CLI output flags to the logging settings and install the
/// subscriber.
pub fn init_logging(config: &Config) {
    let flags = output::current();
    let mut logging = config.logging.clone();
    if let Some(level) = flags.log_level() {
        logging = logging.with_level(level);
    }
    if flags.json {
        logging.format = "json".into();
    }
    logging.init();
}
