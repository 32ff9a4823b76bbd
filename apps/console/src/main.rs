//! Warden super-admin console.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod console_config;
mod console_services;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use warden_core::{AppError, AppResult};

use crate::cli::Cli;
use crate::console_config::{ConfigOverrides, ConsoleConfig, init_tracing};
use crate::console_services::ConsoleServices;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            if matches!(error, AppError::Unauthorized(_)) {
                eprintln!("hint: sign in again with `warden login`");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = ConsoleConfig::load(ConfigOverrides {
        api_base_url: cli.api_base_url,
        session_file: cli.session_file,
    })?;
    debug!(
        api_base_url = %config.api_base_url,
        session_file = %config.session_file.display(),
        "console configured"
    );

    let services = ConsoleServices::build(&config)?;
    commands::run(&services, cli.command).await
}
