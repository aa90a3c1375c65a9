//! Configuration management for supersync.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! supersync uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`SUPERSYNC_*` prefix)
//! - Default values for optional settings
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use supersync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("supersync.toml")?;
//!
//! println!("Superset URL: {}", config.superset.base_url);
//! println!("Exports dir: {}", config.workspace.exports_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//!
//! [superset]
//! base_url = "http://localhost:8090"
//! username = "admin"
//! password = "${SUPERSYNC_SUPERSET_PASSWORD}"
//!
//! [workspace]
//! exports_dir = "superset_exports"
//! resources = ["datasets", "charts", "dashboards"]
//! ignore_files = ["metadata.yaml"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used items
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, ImportConfig, LoggingConfig, RetryConfig, SupersetConfig,
    SupersyncConfig, WorkspaceConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
