//! Status command implementation
//!
//! Reports local workspace state without contacting the server: exported
//! object counts, staged bundles, and uncommitted git changes per resource.

use crate::adapters::git::changed_object_dirs;
use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting status command");

        let config = load_config(config_path)?;

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let kinds = match config.resources() {
            Ok(k) => k,
            Err(e) => {
                eprintln!("Configuration validation failed: {e}");
                return Ok(2);
            }
        };

        println!("📋 Workspace Status");
        println!("  Repository: {}", config.workspace.repo_root().display());
        println!("  Exports directory: {}", config.workspace.exports_dir);
        println!();

        for kind in &kinds {
            let exported = count_dirs(&config.exports_dir_for(*kind));
            let staged = count_zips(&config.zips_dir_for(*kind));

            let base_dir = Path::new(&config.workspace.exports_dir).join(kind.dir_name());
            let changed = match changed_object_dirs(config.workspace.repo_root(), &base_dir).await {
                Ok(c) => c.len(),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read git status");
                    eprintln!("Could not read git status: {e}");
                    return Ok(5);
                }
            };

            println!("  {}:", kind.dir_name());
            println!("    Exported objects: {exported}");
            println!("    Uncommitted changes: {changed}");
            println!("    Staged bundles: {staged}");
        }

        println!();
        Ok(0)
    }
}

fn count_dirs(path: &Path) -> usize {
    std::fs::read_dir(path)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.path().is_dir())
                .count()
        })
        .unwrap_or(0)
}

fn count_zips(path: &Path) -> usize {
    std::fs::read_dir(path)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| {
                    e.path().extension().map(|ext| ext == "zip").unwrap_or(false)
                })
                .count()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_count_dirs_missing_path() {
        assert_eq!(count_dirs(Path::new("/nonexistent/path")), 0);
    }

    #[test]
    fn test_count_dirs_and_zips() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("dashboard_1")).unwrap();
        std::fs::create_dir(tmp.path().join("dashboard_2")).unwrap();
        std::fs::write(tmp.path().join("dashboard_1.zip"), b"x").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"x").unwrap();

        assert_eq!(count_dirs(tmp.path()), 2);
        assert_eq!(count_zips(tmp.path()), 1);
    }
}
