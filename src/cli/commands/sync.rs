//! Sync command implementation
//!
//! Runs the full git → server flow: detect changed object directories,
//! pack them into bundles, and import the bundles.

use crate::config::load_config;
use crate::core::sync::SyncCoordinator;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - report detected changes without packing or importing
    #[arg(long)]
    pub dry_run: bool,

    /// Override resource kind(s) to sync (comma-separated)
    #[arg(long)]
    pub resource: Option<String>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

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
            tracing::info!("Dry run mode enabled - changes will only be reported");
            println!("🔍 DRY RUN MODE - Changes will be reported but not imported");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.application.dry_run {
            println!("Sync Configuration:");
            println!("  Server: {}", config.superset.base_url);
            println!("  Repository: {}", config.workspace.repo_root().display());
            println!("  Resources: {:?}", config.workspace.resources);
            println!();
            print!("Proceed with sync? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Sync cancelled.");
                return Ok(0);
            }
        }

        let dry_run = config.application.dry_run;

        tracing::info!("Executing sync");
        println!("🚀 Starting sync...");
        println!();

        let coordinator = SyncCoordinator::new(config, shutdown_signal);
        let summary = match coordinator.execute_sync().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("Sync failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Sync Summary:");
        println!("  Changed objects: {}", summary.changed);
        if !dry_run {
            println!("  Bundles packed: {}", summary.zipped);
            println!("  Pack failures: {}", summary.pack_failures);
            if let Some(report) = &summary.import {
                println!("  Imported: {}", report.imported);
                println!("  Import failures: {}", report.failed);
            }
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if let Some(report) = &summary.import {
            if !report.failures.is_empty() {
                println!("⚠️  Failed bundles (kept on disk for retry):");
                for failure in &report.failures {
                    println!("  - {} ({})", failure.bundle, failure.resource);
                    println!("    Reason: {}", failure.message);
                }
                println!();
            }
        }

        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Sync interrupted gracefully. Remaining bundles are kept.");
            println!("   Run `supersync import` to push them.");
            println!();
            tracing::info!("Sync interrupted by user signal");
            130 // SIGINT exit code
        } else if summary.is_successful() {
            println!("✅ Sync completed successfully!");
            0
        } else {
            println!("⚠️  Sync completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_args_defaults() {
        let args = SyncArgs {
            yes: false,
            dry_run: false,
            resource: None,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.resource.is_none());
    }
}
