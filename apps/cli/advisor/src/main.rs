use advisor::cli::Cli;
use advisor::commands;
use advisor::error::AdvisorError;
use advisor::logger::initialize as LoggerInitialize;
use advisor::paths::{default_config_dir, default_log_dir};

use advisor_core::credential::load_credential;
use advisor_core::error::CoreError;
use advisor_core::{AdvisorConfig, CompletionClient};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.user_message());
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AdvisorError> {
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);

    create_dir_all(&log_dir).map_err(|e| AdvisorError::Advisor {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, cli.log_level())?;

    info!("Liquor advisor starting");
    info!("Log directory: {}", log_dir.display());

    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    let config = AdvisorConfig::load(&config_dir).map_err(CoreError::from)?;

    // Unset or blank is not an error here; it surfaces per call as MissingCredential
    let credential = load_credential(&config.completion.api_key_env).map_err(CoreError::from)?;

    let client = CompletionClient::new(&config.completion, credential).map_err(CoreError::from)?;

    let output = commands::dispatch(&cli.command, &client, &config).await?;

    if output.success {
        println!("{}", output.text);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", output.text);
        Ok(ExitCode::FAILURE)
    }
}
