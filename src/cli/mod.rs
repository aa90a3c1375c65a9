//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for supersync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// supersync - Superset asset export/import tool
#[derive(Parser, Debug)]
#[command(name = "supersync")]
#[command(version, about, long_about = None)]
#[command(author = "supersync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "supersync.toml", env = "SUPERSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SUPERSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export assets from a Superset server into the workspace
    Export(commands::export::ExportArgs),

    /// Import staged zip bundles into a Superset server
    Import(commands::import::ImportArgs),

    /// Detect committed changes, pack them, and import them
    Sync(commands::sync::SyncArgs),

    /// Show local workspace status
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
