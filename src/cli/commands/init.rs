//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "supersync.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing supersync configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set SUPERSET_USERNAME and SUPERSET_PASSWORD in your environment");
                println!("     (or in a .env file next to the config)");
                println!("  3. Validate configuration: supersync validate-config");
                println!("  4. Pull assets from the server: supersync export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# supersync Configuration File
# Superset asset export/import tool

# Deployment environment (development, staging, production)
environment = "development"

[application]
log_level = "info"
dry_run = false

[superset]
base_url = "https://superset.example.com"
auth_provider = "db"
username = "${SUPERSET_USERNAME}"
password = "${SUPERSET_PASSWORD}"

# TLS settings
tls_verify = true

# API paging
page_size = 100
timeout_seconds = 60

[superset.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[workspace]
repo_root = "."
exports_dir = "superset_exports"
zips_dir = ".tmp_zips"
resources = ["datasets", "charts", "dashboards"]
ignore_files = ["metadata.yaml"]

[import]
overwrite = true
delete_zips = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# supersync Configuration File
# Superset asset export/import tool
#
# This file contains all configuration options with examples and explanations.

# ============================================================================
# Environment
# ============================================================================
# Deployment environment: development | staging | production
# Production refuses to run with TLS verification disabled.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (report what would happen without writing or importing)
dry_run = false

# ============================================================================
# Superset Server Configuration
# ============================================================================
[superset]
# Base URL of the Superset server (no trailing path)
base_url = "https://superset.example.com"

# Authentication provider passed to /api/v1/security/login
# "db" for database auth, "ldap" for LDAP
auth_provider = "db"

# Credentials (use environment variables)
username = "${SUPERSET_USERNAME}"
password = "${SUPERSET_PASSWORD}"

# TLS/SSL verification
tls_verify = true

# Objects fetched per list page (1-100, the server caps at 100)
page_size = 100

# HTTP request timeout in seconds
timeout_seconds = 60

# Retry policy for idempotent requests (list, export).
# Imports are never retried.
[superset.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Workspace Configuration
# ============================================================================
[workspace]
# Git repository root holding the exported assets
repo_root = "."

# Directory (relative to repo_root) where exports are unpacked,
# one subdirectory per resource kind, one object directory per asset
exports_dir = "superset_exports"

# Staging directory for zip bundles awaiting import
zips_dir = ".tmp_zips"

# Resource kinds to manage. Imports always run in dependency order:
# databases, datasets, charts, dashboards.
resources = ["datasets", "charts", "dashboards"]

# Files that are written on first export but never overwritten afterwards
ignore_files = ["metadata.yaml"]

# ============================================================================
# Import Configuration
# ============================================================================
[import]
# Ask the server to overwrite existing assets
overwrite = true

# Delete zip bundles after a successful import
delete_zips = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging in addition to console output
local_enabled = false

# Local log file path
local_path = "logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "supersync.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "supersync.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[superset]"));
        assert!(config.contains("[workspace]"));
        assert!(config.contains("${SUPERSET_PASSWORD}"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# supersync Configuration File"));
        assert!(config.contains("page_size"));
        assert!(config.contains("ignore_files"));
    }

    #[test]
    fn test_minimal_config_parses() {
        let config: crate::config::SupersyncConfig =
            toml::from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.workspace.exports_dir, "superset_exports");
    }
}
