use clap::Parser;
use pairpulse::adapter::inbound::cli::check::{config, store, telegram};
use pairpulse::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use pairpulse::adapter::inbound::cli::output::{self, OutputConfig};
use pairpulse::adapter::inbound::cli::run;
use pairpulse::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    if let Err(e) = dispatch(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(args)) => config::execute_config(&args.config),
        Commands::Check(CheckCommand::Telegram(args)) => {
            telegram::execute_telegram(&args.config, &args.message).await
        }
        Commands::Check(CheckCommand::Store(args)) => store::execute_store(&args.config).await,
    }
}
