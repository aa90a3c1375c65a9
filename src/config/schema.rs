//! Configuration schema types
//!
//! This module defines the configuration structure for supersync. The root
//! structure maps one-to-one onto the TOML file.

use crate::config::SecretString;
use crate::domain::ResourceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main supersync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupersyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Superset server configuration
    pub superset: SupersetConfig,

    /// Working-tree layout and resource selection
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Import behaviour
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SupersyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.superset.validate(&self.environment)?;
        self.workspace.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Resource kinds selected for export/sync, parsed and deduplicated
    pub fn resources(&self) -> Result<Vec<ResourceKind>, String> {
        let mut kinds = Vec::new();
        for name in &self.workspace.resources {
            let kind = ResourceKind::from_str(name).map_err(|e| e.to_string())?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    /// Absolute-ish path of the exports directory for a resource kind
    pub fn exports_dir_for(&self, kind: ResourceKind) -> PathBuf {
        self.workspace.exports_root().join(kind.dir_name())
    }

    /// Path of the zip staging directory for a resource kind
    pub fn zips_dir_for(&self, kind: ResourceKind) -> PathBuf {
        self.workspace.zips_root().join(kind.dir_name())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (report planned actions without touching server or disk)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Superset server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupersetConfig {
    /// Base URL of the Superset server, e.g. `http://localhost:8090`
    pub base_url: String,

    /// Authentication provider passed to the login endpoint
    /// (`db` for local accounts, `ldap` for LDAP-backed ones)
    #[serde(default = "default_auth_provider")]
    pub auth_provider: String,

    /// Username for authentication
    pub username: String,

    /// Password for authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes the
    /// application to man-in-the-middle attacks and should ONLY be used in
    /// development/testing environments. In production this MUST be `true`
    /// (enforced by validation).
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size for list requests (Superset caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl SupersetConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("superset.base_url cannot be empty".to_string());
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("superset.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("superset.base_url must start with http:// or https://".to_string());
        }

        if self.username.is_empty() {
            return Err("superset.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("superset.password cannot be empty".to_string());
        }

        if !(1..=100).contains(&self.page_size) {
            return Err(format!(
                "superset.page_size must be between 1 and 100, got {}",
                self.page_size
            ));
        }

        // TLS verification must stay on in production
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                 Either set 'tls_verify = true' or set 'environment' to \"development\" \
                 or \"staging\"."
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Working-tree layout and resource selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Root of the git repository holding the exported assets
    #[serde(default = "default_repo_root")]
    pub repo_root: String,

    /// Directory (relative to repo_root) holding exported object directories
    #[serde(default = "default_exports_dir")]
    pub exports_dir: String,

    /// Directory (relative to repo_root) for transient import zips
    #[serde(default = "default_zips_dir")]
    pub zips_dir: String,

    /// Resource kinds to export/sync, in processing order
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,

    /// File basenames that are never overwritten once exported
    /// (`metadata.yaml` carries a server-local export timestamp that would
    /// otherwise dirty the git tree on every run)
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
}

impl WorkspaceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.repo_root.is_empty() {
            return Err("workspace.repo_root cannot be empty".to_string());
        }
        if self.exports_dir.is_empty() {
            return Err("workspace.exports_dir cannot be empty".to_string());
        }
        if self.zips_dir.is_empty() {
            return Err("workspace.zips_dir cannot be empty".to_string());
        }
        if self.resources.is_empty() {
            return Err("workspace.resources cannot be empty".to_string());
        }
        for name in &self.resources {
            ResourceKind::from_str(name).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Repository root as a path
    pub fn repo_root(&self) -> &Path {
        Path::new(&self.repo_root)
    }

    /// Exports directory resolved against the repository root
    pub fn exports_root(&self) -> PathBuf {
        self.repo_root().join(&self.exports_dir)
    }

    /// Zip staging directory resolved against the repository root
    pub fn zips_root(&self) -> PathBuf {
        self.repo_root().join(&self.zips_dir)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            exports_dir: default_exports_dir(),
            zips_dir: default_zips_dir(),
            resources: default_resources(),
            ignore_files: default_ignore_files(),
        }
    }
}

/// Import behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Pass `overwrite=true` to the import endpoint
    #[serde(default = "default_true")]
    pub overwrite: bool,

    /// Delete each zip after it imports successfully
    #[serde(default = "default_true")]
    pub delete_zips: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            delete_zips: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_auth_provider() -> String {
    "db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> usize {
    100
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_repo_root() -> String {
    ".".to_string()
}

fn default_exports_dir() -> String {
    "superset_exports".to_string()
}

fn default_zips_dir() -> String {
    ".tmp_zips".to_string()
}

fn default_resources() -> Vec<String> {
    vec![
        "datasets".to_string(),
        "charts".to_string(),
        "dashboards".to_string(),
    ]
}

fn default_ignore_files() -> Vec<String> {
    vec!["metadata.yaml".to_string()]
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
