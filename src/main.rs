// Nubilum - HL7 v2 Message Anonymizer
// Copyright (c) 2025 Nubilum Contributors
// Licensed under the MIT License

use clap::Parser;
use nubilum::cli::{Cli, Commands};
use nubilum::config::{load_config_or_default, NubilumConfig};
use nubilum::domain::{NubilumError, Result};
use nubilum::log_error_with_context;
use nubilum::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once; a configuration error is reported by the command that needs it
    let loaded = load_config_or_default(&cli.config);
    let fallback = NubilumConfig::default();
    let settings = loaded.as_ref().unwrap_or(&fallback);
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.application.log_level.clone());

    let logging_guard = match init_logging(&log_level, &settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Nubilum - HL7 v2 Message Anonymizer"
    );

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // Flush file logs before exiting
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
///
/// `validate-config` loads the file itself since a missing file is an error there.
async fn execute_command(cli: &Cli, loaded: Result<NubilumConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(configuration_error(&e)),
        },
        Commands::Stats(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(configuration_error(&e)),
        },
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}

fn configuration_error(error: &NubilumError) -> i32 {
    log_error_with_context!(error, "Failed to load configuration");
    eprintln!("❌ Failed to load configuration: {error}");
    2 // Configuration error exit code
}
