//! Export command implementation
//!
//! Pulls every configured asset out of a Superset server and unpacks the
//! bundles into the workspace export tree.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dry run mode - list objects without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Override resource kind(s) to export (comma-separated)
    #[arg(long)]
    pub resource: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(resources) = &self.resource {
            let kinds: Vec<String> = resources.split(',').map(|s| s.trim().to_string()).collect();
            tracing::info!(resources = ?kinds, "Overriding resource kinds from CLI");
            config.workspace.resources = kinds;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written to the workspace");
            println!();
        }

        // Create export coordinator (logs in during construction)
        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        tracing::info!("Executing export");
        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Total objects: {}", summary.total_objects);
        println!("  Exported: {}", summary.exported);
        println!("  Unchanged: {}", summary.unchanged);
        println!("  Failed: {}", summary.failed);
        println!("  Files written: {}", summary.files_written);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
            }
            println!();
        }

        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Export interrupted gracefully. Files written so far are kept.");
            println!("   Run the same command to export the remaining objects.");
            println!();
            tracing::info!("Export interrupted by user signal");
            130 // SIGINT exit code
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs {
            dry_run: false,
            resource: None,
        };

        assert!(!args.dry_run);
        assert!(args.resource.is_none());
    }

    #[test]
    fn test_export_args_with_overrides() {
        let args = ExportArgs {
            dry_run: true,
            resource: Some("dashboards,charts".to_string()),
        };

        assert!(args.dry_run);
        assert_eq!(args.resource, Some("dashboards,charts".to_string()));
    }
}
