//! `mpris-controller` entry point.
//!
//! `daemon` runs the controller; every other command is a short-lived client.

use std::{error::Error, process};

use clap::Parser;
use mpris_controller::{
    cli::{Cli, CliCommand, CliService, ClientCommand, formatting::format_error},
    config::Config,
    services::{ControllerService, mpris::Config as ServiceConfig},
    tracing_config,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let result = match cli.command {
        CliCommand::Daemon => run_daemon(&cli).await,
        CliCommand::Client(command) => run_cli_command(&cli, command).await,
    };

    if let Err(e) = result {
        eprintln!("{}", format_error(&e.to_string()));
        process::exit(1);
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(config)
}

async fn run_daemon(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli)?;
    let _guard = tracing_config::init_daemon(config.general.log_level, cli.debug)?;

    info!("Starting MPRIS controller daemon");

    let service_config = ServiceConfig {
        ignored_players: config.players.ignore_patterns()?,
    };

    ControllerService::run(service_config).await?;

    Ok(())
}

async fn run_cli_command(cli: &Cli, command: ClientCommand) -> Result<(), Box<dyn Error>> {
    tracing_config::init_cli_mode()?;

    let output = CliService::new(!cli.no_autostart).execute(command).await?;

    if !output.trim().is_empty() {
        println!("{output}");
    }

    Ok(())
}
