//! Import runner - pushes staged zip bundles into a Superset server
//!
//! Bundles are imported in dependency order (databases → datasets →
//! charts → dashboards) so references resolve; each zip is deleted once
//! the server accepts it.

use crate::adapters::superset::SupersetClient;
use crate::config::SupersyncConfig;
use crate::core::import::report::ImportReport;
use crate::domain::{ResourceKind, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::watch;

/// Import runner
///
/// Borrows an authenticated [`SupersetClient`] (with a CSRF token already
/// fetched) so the sync pipeline can reuse one session for detection,
/// packing and import.
pub struct ImportRunner<'a> {
    config: &'a SupersyncConfig,
    client: &'a SupersetClient,
    shutdown_signal: watch::Receiver<bool>,
}

impl<'a> ImportRunner<'a> {
    /// Create a new import runner
    pub fn new(
        config: &'a SupersyncConfig,
        client: &'a SupersetClient,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            client,
            shutdown_signal,
        }
    }

    /// Import every staged zip, in dependency order
    ///
    /// Missing staging directories are skipped silently; a failed bundle is
    /// recorded and left on disk for a later retry.
    pub async fn run(&self) -> Result<ImportReport> {
        let start_time = Instant::now();
        let mut report = ImportReport::new();
        let dry_run = self.config.application.dry_run;

        'kinds: for kind in ResourceKind::IMPORT_ORDER {
            let zips_dir = self.config.zips_dir_for(kind);
            let zips = find_zips(&zips_dir)?;
            if zips.is_empty() {
                tracing::debug!(resource = %kind, "No bundles staged");
                continue;
            }

            tracing::info!(resource = %kind, count = zips.len(), "Importing staged bundles");
            report.total_bundles += zips.len();

            for zip_path in zips {
                if *self.shutdown_signal.borrow() {
                    tracing::info!("Shutdown signal received, stopping import");
                    report.interrupted = true;
                    break 'kinds;
                }

                let zip_name = zip_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| zip_path.display().to_string());

                if dry_run {
                    tracing::info!(
                        resource = %kind,
                        bundle = %zip_name,
                        "Would import bundle (dry run)"
                    );
                    continue;
                }

                self.import_one(kind, &zip_path, &zip_name, &mut report)
                    .await;
            }
        }

        report.duration = start_time.elapsed();
        report.log_report();
        Ok(report)
    }

    /// Import a single bundle, then delete it if configured to
    async fn import_one(
        &self,
        kind: ResourceKind,
        zip_path: &Path,
        zip_name: &str,
        report: &mut ImportReport,
    ) {
        let bytes = match fs::read(zip_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.add_failure(kind, zip_name, format!("failed to read zip: {e}"));
                return;
            }
        };

        match self
            .client
            .import_bundle(kind, zip_name, bytes, self.config.import.overwrite)
            .await
        {
            Ok(()) => {
                report.imported += 1;
                if self.config.import.delete_zips {
                    match fs::remove_file(zip_path) {
                        Ok(()) => {
                            report.deleted += 1;
                            tracing::debug!(bundle = %zip_name, "Deleted imported zip");
                        }
                        Err(e) => {
                            // Import succeeded; a leftover zip is only noise
                            tracing::warn!(
                                bundle = %zip_name,
                                error = %e,
                                "Failed to delete imported zip"
                            );
                        }
                    }
                }
            }
            Err(e) => {
                report.add_failure(kind, zip_name, e.to_string());
            }
        }
    }
}

/// List the zip files in a staging directory, sorted by name
///
/// A missing directory yields an empty list.
pub fn find_zips(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut zips: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("zip"))
                    .unwrap_or(false)
        })
        .collect();

    zips.sort();
    Ok(zips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_zips_missing_dir() {
        let dir = tempdir().unwrap();
        let zips = find_zips(&dir.path().join("nope")).unwrap();
        assert!(zips.is_empty());
    }

    #[test]
    fn test_find_zips_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.zip"), b"x").unwrap();
        fs::write(dir.path().join("a.zip"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub.zip")).unwrap();

        let zips = find_zips(dir.path()).unwrap();
        let names: Vec<String> = zips
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.zip", "b.zip"]);
    }
}
