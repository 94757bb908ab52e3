//! CLI output formatting.
//!
//! Human-readable lines with colored symbols, or one JSON object per line
//! in `--json` mode. `--quiet` suppresses everything except warnings and
//! errors.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    /// Log level implied by the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> Option<&'static str> {
        match (self.quiet, self.verbose) {
            (true, _) => Some("warn"),
            (false, 0) => None,
            (false, 1) => Some("debug"),
            (false, _) => Some("trace"),
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    *config_cell().read()
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

#[must_use]
pub fn current() -> OutputConfig {
    read_config()
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line(
            "header",
            json!({
                "app": "pairpulse",
                "version": version,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("{} {}", "pairpulse".bold(), version.dimmed());
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line(
            "field",
            json!({
                "label": label,
                "value": value,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", title.bold());
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

/// Print an action in progress ("Sending...", "Checking...").
pub fn action(verb: &str, target: &str) {
    let config = read_config();

    if config.json {
        emit_json_line(
            "action",
            json!({
                "verb": verb,
                "target": target,
                "status": "in_progress",
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}...", verb.bold().cyan(), target);
}

/// Emit a JSON value directly (for commands that need custom JSON output).
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}
