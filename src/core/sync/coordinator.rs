//! Sync coordinator - pushes committed changes into a Superset environment
//!
//! The git → server sync runs after a pull: changed object directories are
//! detected from `git status --porcelain`, packed into zip bundles, and
//! imported into the target server in dependency order.

use crate::adapters::git::changed_object_dirs;
use crate::adapters::superset::SupersetClient;
use crate::config::SupersyncConfig;
use crate::core::archive::pack_object_dir;
use crate::core::import::{ImportReport, ImportRunner};
use crate::core::sync::summary::SyncSummary;
use crate::domain::{ResourceKind, Result, SupersyncError};
use std::path::Path;
use std::time::Instant;
use tokio::sync::watch;

/// Sync coordinator
pub struct SyncCoordinator {
    config: SupersyncConfig,
    shutdown_signal: watch::Receiver<bool>,
}

impl SyncCoordinator {
    /// Create a new sync coordinator
    ///
    /// No server connection is made yet; login happens only when there is
    /// something to import.
    pub fn new(config: SupersyncConfig, shutdown_signal: watch::Receiver<bool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// Execute the sync
    ///
    /// 1. Detect changed object directories per resource kind
    /// 2. Pack each into a staged zip bundle
    /// 3. Log in, fetch a CSRF token, and import the staged bundles
    ///
    /// In dry-run mode the run stops after reporting detected changes.
    pub async fn execute_sync(&self) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let mut summary = SyncSummary::new();
        let dry_run = self.config.application.dry_run;

        let kinds = self
            .config
            .resources()
            .map_err(SupersyncError::Configuration)?;

        // Step 1 + 2: detect and pack
        for kind in &kinds {
            let changed = self.detect_changes(*kind).await?;
            if changed.is_empty() {
                tracing::info!(resource = %kind, "No changes detected");
                continue;
            }

            tracing::info!(
                resource = %kind,
                count = changed.len(),
                objects = ?changed,
                "Changed objects detected"
            );
            summary.changed += changed.len();

            if dry_run {
                for name in &changed {
                    tracing::info!(resource = %kind, object = %name, "Would sync (dry run)");
                }
                continue;
            }

            for name in &changed {
                let object_dir = self.config.exports_dir_for(*kind).join(name);
                let output_zip = self.config.zips_dir_for(*kind).join(format!("{name}.zip"));

                match pack_object_dir(&object_dir, &output_zip) {
                    Ok(path) => {
                        tracing::info!(bundle = %path.display(), "Created zip");
                        summary.zipped += 1;
                    }
                    Err(e) => {
                        // A deleted object directory still shows up in git
                        // status; there is nothing to re-import for it
                        tracing::warn!(
                            resource = %kind,
                            object = %name,
                            error = %e,
                            "Failed to pack changed object"
                        );
                        summary.pack_failures += 1;
                    }
                }
            }
        }

        if dry_run {
            summary.duration = start_time.elapsed();
            return Ok(summary);
        }

        if summary.zipped == 0 {
            tracing::info!("Nothing to import");
            summary.duration = start_time.elapsed();
            return Ok(summary);
        }

        // Step 3: import staged bundles
        let mut client = SupersetClient::new(self.config.superset.clone())?;
        client.login().await?;
        client.fetch_csrf_token().await?;

        let runner = ImportRunner::new(&self.config, &client, self.shutdown_signal.clone());
        let report: ImportReport = runner.run().await?;
        summary.interrupted = report.interrupted;
        summary.import = Some(report);

        summary.duration = start_time.elapsed();
        summary.log_summary();
        Ok(summary)
    }

    /// Detect changed object directories for one resource kind
    ///
    /// The base directory handed to the porcelain parser is relative to the
    /// repository root, the way git reports paths.
    async fn detect_changes(&self, kind: ResourceKind) -> Result<Vec<String>> {
        let base_dir = Path::new(&self.config.workspace.exports_dir).join(kind.dir_name());
        let changed = changed_object_dirs(self.config.workspace.repo_root(), &base_dir).await?;
        Ok(changed.into_iter().collect())
    }
}
