//! clipms - serves the last copied URI as a MediaServer2 item.

use std::{error::Error, process};

use clap::Parser;
use clipms::{
    cli::{Cli, Command, RunArgs, config_output, formatting::format_error},
    service_manager::ClipboardMediaService,
    services::SystemClipboard,
    tracing_config,
};
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn Error>> = match &cli.command {
        Some(Command::Config { action }) => config_output(action)
            .map(|output| println!("{output}"))
            .map_err(Into::into),
        Some(Command::Run(args)) => run_server(args).await,
        None => run_server(&cli.run).await,
    };

    if let Err(e) = result {
        eprintln!("{}", format_error(&e.to_string()));
        process::exit(1);
    }
}

/// Loads configuration, sets up logging and serves until the process is
/// killed.
///
/// # Errors
/// Returns error if configuration, logging, the clipboard or the session bus
/// can't be set up.
async fn run_server(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = args.load_config()?;

    let _log_guard = if config.general.log_to_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    info!(
        app_name = %config.server.app_name,
        selection = %config.server.selection,
        interval_ms = config.server.poll_interval_ms,
        "Starting clipboard media server"
    );

    let clipboard = SystemClipboard::open(config.server.selection)?;
    let service = ClipboardMediaService::start(config).await?;
    service.run(clipboard).await?;

    Ok(())
}
