//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Nubilum using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Nubilum - HL7 v2 Message Anonymizer
#[derive(Parser, Debug)]
#[command(name = "nubilum")]
#[command(version, about, long_about = None)]
#[command(author = "Nubilum Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "nubilum.toml", env = "NUBILUM_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NUBILUM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize HL7 v2 messages from files or stdin
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Show usage statistics
    Stats(commands::stats::StatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
