//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the supersync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Environment: {:?}", config.environment);
                println!("  Log Level: {}", config.application.log_level);
                println!("  Superset Server: {}", config.superset.base_url);
                println!("  Auth Provider: {}", config.superset.auth_provider);
                println!("  Username: {}", config.superset.username);
                println!("  TLS Verification: {}", config.superset.tls_verify);
                println!("  Page Size: {}", config.superset.page_size);
                println!("  Repository: {}", config.workspace.repo_root().display());
                println!("  Exports Directory: {}", config.workspace.exports_dir);
                println!("  Zips Directory: {}", config.workspace.zips_dir);
                println!("  Resources: {:?}", config.workspace.resources);
                println!("  Ignore Files: {:?}", config.workspace.ignore_files);
                println!("  Overwrite on Import: {}", config.import.overwrite);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
