// ABOUTME: Main entry point for the Clipdrop CLI application
// ABOUTME: Loads configuration, builds the SDK client, and runs one image operation

use anyhow::{Context, Result};
use clap::Parser;
use clipdrop_cli::cli::Cli;
use clipdrop_cli::commands;
use clipdrop_cli::config::Config;
use clipdrop_sdk::{ClipdropClient, ClipdropError};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        if let Some(help) = err
            .downcast_ref::<ClipdropError>()
            .and_then(ClipdropError::help_text)
        {
            eprintln!();
            eprintln!("{help}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()
        .context("Failed to load configuration")?
        .with_overrides(cli.base_url, cli.api_version);

    let client: Result<ClipdropClient, ClipdropError> = config.client_config(cli.api_key).into();
    let client = client?;
    log::debug!("Using {} ({})", client.base_url(), client.version());

    let saved = commands::run(&client, cli.command)?;
    println!("{}", commands::describe(&saved));
    Ok(())
}
