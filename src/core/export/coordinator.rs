//! Export coordinator - orchestrates the Superset → working tree export
//!
//! For each configured resource kind the coordinator lists every object,
//! downloads its export bundle and unpacks it into a stable per-object
//! directory. Per-object failures are recorded and skipped; a shutdown
//! signal is honored between objects.

use crate::adapters::superset::SupersetClient;
use crate::config::SupersyncConfig;
use crate::core::archive::unpack_bundle;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::domain::{ResourceKind, Result, SupersyncError};
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    config: SupersyncConfig,
    client: SupersetClient,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a new export coordinator and log in to the server
    pub async fn new(
        config: SupersyncConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let mut client = SupersetClient::new(config.superset.clone())?;
        client.login().await?;

        Ok(Self {
            config,
            client,
            shutdown_signal,
        })
    }

    /// Execute the export
    ///
    /// For each configured resource kind:
    /// 1. List all objects page by page
    /// 2. Download each object's export bundle
    /// 3. Unpack it into `exports_dir/<kind>/<kind>_<id>/`, writing only
    ///    changed files
    ///
    /// In dry-run mode, objects are listed but nothing is downloaded or
    /// written.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        let dry_run = self.config.application.dry_run;

        let kinds = self
            .config
            .resources()
            .map_err(SupersyncError::Configuration)?;

        tracing::info!(
            resources = ?kinds.iter().map(|k| k.api_name()).collect::<Vec<_>>(),
            dry_run = dry_run,
            "Starting export"
        );

        'resources: for kind in kinds {
            let objects = match self.client.list_all(kind).await {
                Ok(objects) => objects,
                Err(e) => {
                    tracing::error!(resource = %kind, error = %e, "Failed to list objects");
                    summary.add_error(
                        ExportError::new(ExportErrorType::Listing, e.to_string())
                            .with_resource(kind),
                    );
                    continue;
                }
            };

            summary.total_objects += objects.len();

            if objects.is_empty() {
                tracing::info!(resource = %kind, "No objects to export");
                continue;
            }

            for object in &objects {
                if *self.shutdown_signal.borrow() {
                    tracing::info!("Shutdown signal received, stopping export");
                    summary.interrupted = true;
                    break 'resources;
                }

                let name = object.name().unwrap_or("<unnamed>");
                if dry_run {
                    tracing::info!(
                        resource = %kind,
                        id = object.id,
                        name = %name,
                        "Would export object (dry run)"
                    );
                    continue;
                }

                match self.export_object(kind, object.id).await {
                    Ok(files_written) => {
                        summary.exported += 1;
                        summary.files_written += files_written;
                        if files_written == 0 {
                            summary.unchanged += 1;
                            tracing::info!(
                                resource = %kind,
                                id = object.id,
                                name = %name,
                                "No changes"
                            );
                        } else {
                            tracing::info!(
                                resource = %kind,
                                id = object.id,
                                name = %name,
                                files_written = files_written,
                                "Exported object"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            resource = %kind,
                            id = object.id,
                            error = %e,
                            "Failed to export object"
                        );
                        summary.failed += 1;
                        // Download failures surface as client errors; anything
                        // else means the bundle could not be unpacked to disk
                        let error_type = if matches!(e, SupersyncError::Superset(_)) {
                            ExportErrorType::Download
                        } else {
                            ExportErrorType::Unpack
                        };
                        summary.add_error(
                            ExportError::new(error_type, e.to_string())
                                .with_resource(kind)
                                .with_object_id(object.id),
                        );
                    }
                }
            }
        }

        summary.duration = start_time.elapsed();
        summary.log_summary();
        Ok(summary)
    }

    /// Export one object: download its bundle and unpack it
    ///
    /// Returns the number of files written.
    async fn export_object(&self, kind: ResourceKind, id: u64) -> Result<usize> {
        let bytes = self.client.export_bundle(kind, id).await?;

        let dest = self
            .config
            .exports_dir_for(kind)
            .join(kind.object_dir_name(id));

        let outcome = unpack_bundle(&bytes, &dest, &self.config.workspace.ignore_files)
            .map_err(|e| {
                SupersyncError::Export(format!(
                    "failed to unpack {} {id}: {e}",
                    kind.api_name()
                ))
            })?;

        Ok(outcome.files_written)
    }
}
