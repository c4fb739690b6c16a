// Binary entry point - import modules directly
mod cli;
mod config;
mod core;
mod manager;
mod ui;
mod utils;

use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, Context};
use config::Config;
use utils::error::{AppResult, report_error};

fn init_tracing(debug: bool, log_file: Option<&Path>) -> AppResult<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CONTACTDECK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn run(cli: Cli) -> AppResult<()> {
    init_tracing(cli.debug, cli.log_file.as_deref())?;

    let config_path = cli.config.unwrap_or_else(Config::config_file_path);
    let config = Config::load_custom(&config_path)?;

    if !config.general.color {
        colored::control::set_override(false);
    }

    let ctx = Context {
        config,
        config_path,
        data_file: cli.data,
    };
    cli.command.unwrap_or(Commands::Browse).execute(ctx)
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
