//! Command-line interface definitions.
//!
//! Defines the CLI structure for pairpulse using `clap`: the scanner loop
//! itself and a handful of diagnostic checks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DEX pair anomaly scanner
#[derive(Parser, Debug)]
#[command(name = "pairpulse")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scanner loop
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `pairpulse check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file.
    Config(ConfigPathArg),
    /// Send a test message through Telegram.
    Telegram(TelegramCheckArgs),
    /// Insert a test alert into every enabled record store.
    Store(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Run a single tick and exit.
    #[arg(long)]
    pub once: bool,
}

#[derive(Parser, Debug)]
pub struct TelegramCheckArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Message text to send.
    #[arg(default_value = "pairpulse test message")]
    pub message: String,
}
