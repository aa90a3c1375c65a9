//! Import command implementation
//!
//! Pushes staged zip bundles into a Superset server in dependency order.

use crate::adapters::superset::SupersetClient;
use crate::config::load_config;
use crate::core::import::ImportRunner;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - list bundles without importing them
    #[arg(long)]
    pub dry_run: bool,

    /// Keep zip bundles after a successful import
    #[arg(long)]
    pub keep_zips: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting import command");

        // Load configuration
        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if self.keep_zips {
            tracing::info!("Keeping zip bundles after import");
            config.import.delete_zips = false;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no bundles will be imported");
            println!("🔍 DRY RUN MODE - No bundles will be imported");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.application.dry_run {
            println!("Import Configuration:");
            println!("  Server: {}", config.superset.base_url);
            println!("  Zips directory: {}", config.workspace.zips_dir);
            println!("  Overwrite existing assets: {}", config.import.overwrite);
            println!();
            print!("Proceed with import? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Import cancelled.");
                return Ok(0);
            }
        }

        // Connect and authenticate
        tracing::info!("Connecting to Superset");
        let client_result = async {
            let mut client = SupersetClient::new(config.superset.clone())?;
            client.login().await?;
            client.fetch_csrf_token().await?;
            Ok::<_, crate::domain::SupersyncError>(client)
        }
        .await;

        let client = match client_result {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to Superset");
                eprintln!("Failed to connect to Superset: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        tracing::info!("Executing import");
        println!("🚀 Starting import...");
        println!();

        let runner = ImportRunner::new(&config, &client, shutdown_signal);
        let report = match runner.run().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                eprintln!("Import failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display report
        println!();
        println!("📊 Import Report:");
        println!("  Total bundles: {}", report.total_bundles);
        println!("  Imported: {}", report.imported);
        println!("  Failed: {}", report.failed);
        println!("  Zips deleted: {}", report.deleted);
        println!("  Duration: {:.2}s", report.duration.as_secs_f64());
        println!();

        if !report.failures.is_empty() {
            println!("⚠️  Failed bundles (kept on disk for retry):");
            for failure in &report.failures {
                println!("  - {} ({})", failure.bundle, failure.resource);
                println!("    Reason: {}", failure.message);
            }
            println!();
        }

        let exit_code = if report.interrupted {
            println!();
            println!("⚠️  Import interrupted gracefully. Remaining bundles are kept.");
            println!("   Run the same command to import them.");
            println!();
            tracing::info!("Import interrupted by user signal");
            130 // SIGINT exit code
        } else if report.is_successful() {
            println!("✅ Import completed successfully!");
            0
        } else {
            println!("⚠️  Import completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_args_defaults() {
        let args = ImportArgs {
            yes: false,
            dry_run: false,
            keep_zips: false,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(!args.keep_zips);
    }
}
