//! Unpacking export bundles into object directories
//!
//! Superset export bundles wrap everything in a generated top-level folder
//! (`dashboard_export_20240101T000000/...`) whose name changes on every
//! export. That folder is stripped so the on-disk layout stays stable, and
//! files are only rewritten when their content actually changed, keeping
//! the git tree clean across repeated exports.

use crate::domain::errors::ArchiveError;
use crate::domain::Result;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Counters describing what one unpack did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOutcome {
    /// Files created or rewritten because their content changed
    pub files_written: usize,
    /// Files left alone because the content was identical
    pub files_unchanged: usize,
    /// Files skipped because their basename is on the ignore list
    /// and they already exist on disk
    pub files_ignored: usize,
}

impl UnpackOutcome {
    /// Whether the unpack changed anything on disk
    pub fn changed(&self) -> bool {
        self.files_written > 0
    }
}

/// Unpack an export bundle into `dest`
///
/// The bundle's top-level folder is stripped; directory entries are
/// skipped; files named in `ignore_files` are never overwritten once they
/// exist (the export timestamp in `metadata.yaml` would otherwise dirty
/// the tree on every run).
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidArchive`] if `bytes` is not a readable
/// zip, and [`ArchiveError::WriteFailed`] if a file cannot be written.
pub fn unpack_bundle(bytes: &[u8], dest: &Path, ignore_files: &[String]) -> Result<UnpackOutcome> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::from)?;

    let entry_names: Vec<String> = archive.file_names().map(String::from).collect();
    let top_level = detect_top_level(&entry_names);

    fs::create_dir_all(dest).map_err(|e| ArchiveError::WriteFailed {
        path: dest.display().to_string(),
        message: e.to_string(),
    })?;

    let mut outcome = UnpackOutcome::default();

    for entry_name in &entry_names {
        let relative = match top_level {
            Some(ref top) => entry_name
                .strip_prefix(&format!("{top}/"))
                .unwrap_or(entry_name),
            None => entry_name.as_str(),
        };

        // Directory entries and the bare top-level folder itself
        if relative.is_empty() || relative.ends_with('/') {
            continue;
        }

        // Entry names come from the server; refuse anything that would
        // resolve outside dest (absolute paths, `..` traversal)
        let rel_path = Path::new(relative);
        if rel_path.is_absolute()
            || rel_path
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(ArchiveError::InvalidArchive(format!(
                "entry escapes the destination directory: {entry_name}"
            ))
            .into());
        }

        let target = dest.join(rel_path);

        let basename = Path::new(relative)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if ignore_files.iter().any(|f| f == &basename) && target.exists() {
            tracing::debug!(file = %relative, "Ignored existing file");
            outcome.files_ignored += 1;
            continue;
        }

        let mut entry = archive
            .by_name(entry_name)
            .map_err(ArchiveError::from)?;
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| ArchiveError::EntryReadFailed {
                entry: entry_name.clone(),
                message: e.to_string(),
            })?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::WriteFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        // Write only when missing or different, so mtimes and git status
        // stay stable across runs
        let unchanged = matches!(fs::read(&target), Ok(existing) if existing == content);
        if unchanged {
            outcome.files_unchanged += 1;
            continue;
        }

        fs::write(&target, &content).map_err(|e| ArchiveError::WriteFailed {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(file = %relative, "File updated");
        outcome.files_written += 1;
    }

    Ok(outcome)
}

/// Find the shared top-level folder of the bundle, if any
fn detect_top_level(entry_names: &[String]) -> Option<String> {
    entry_names
        .iter()
        .find_map(|name| name.split_once('/').map(|(top, _)| top.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn bundle(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_unpack_strips_top_level_folder() {
        let bytes = bundle(&[
            ("dashboard_export_20240101/metadata.yaml", "version: 1.0.0\n"),
            (
                "dashboard_export_20240101/dashboards/sales.yaml",
                "dashboard_title: Sales\n",
            ),
        ]);

        let dir = tempdir().unwrap();
        let outcome = unpack_bundle(&bytes, dir.path(), &[]).unwrap();

        assert_eq!(outcome.files_written, 2);
        assert!(dir.path().join("metadata.yaml").exists());
        assert!(dir.path().join("dashboards/sales.yaml").exists());
        assert!(!dir.path().join("dashboard_export_20240101").exists());
    }

    #[test]
    fn test_unpack_skips_unchanged_files() {
        let bytes = bundle(&[("export/chart.yaml", "slice_name: Revenue\n")]);
        let dir = tempdir().unwrap();

        let first = unpack_bundle(&bytes, dir.path(), &[]).unwrap();
        assert_eq!(first.files_written, 1);
        assert!(first.changed());

        let second = unpack_bundle(&bytes, dir.path(), &[]).unwrap();
        assert_eq!(second.files_written, 0);
        assert_eq!(second.files_unchanged, 1);
        assert!(!second.changed());
    }

    #[test]
    fn test_unpack_rewrites_changed_files() {
        let dir = tempdir().unwrap();
        let v1 = bundle(&[("export/chart.yaml", "slice_name: Revenue\n")]);
        let v2 = bundle(&[("export/chart.yaml", "slice_name: Revenue v2\n")]);

        unpack_bundle(&v1, dir.path(), &[]).unwrap();
        let outcome = unpack_bundle(&v2, dir.path(), &[]).unwrap();

        assert_eq!(outcome.files_written, 1);
        let content = fs::read_to_string(dir.path().join("chart.yaml")).unwrap();
        assert_eq!(content, "slice_name: Revenue v2\n");
    }

    #[test]
    fn test_unpack_honors_ignore_list_only_for_existing_files() {
        let dir = tempdir().unwrap();
        let ignore = vec!["metadata.yaml".to_string()];
        let v1 = bundle(&[("export/metadata.yaml", "timestamp: 2024-01-01\n")]);
        let v2 = bundle(&[("export/metadata.yaml", "timestamp: 2024-06-01\n")]);

        // First export writes the file even though it is on the ignore list
        let first = unpack_bundle(&v1, dir.path(), &ignore).unwrap();
        assert_eq!(first.files_written, 1);

        // Later exports never touch it again
        let second = unpack_bundle(&v2, dir.path(), &ignore).unwrap();
        assert_eq!(second.files_ignored, 1);
        assert_eq!(second.files_written, 0);
        let content = fs::read_to_string(dir.path().join("metadata.yaml")).unwrap();
        assert_eq!(content, "timestamp: 2024-01-01\n");
    }

    #[test]
    fn test_unpack_without_top_level_folder() {
        let bytes = bundle(&[("metadata.yaml", "version: 1.0.0\n")]);
        let dir = tempdir().unwrap();

        let outcome = unpack_bundle(&bytes, dir.path(), &[]).unwrap();
        assert_eq!(outcome.files_written, 1);
        assert!(dir.path().join("metadata.yaml").exists());
    }

    #[test]
    fn test_unpack_rejects_escaping_entries() {
        let bytes = bundle(&[("export/../../evil.yaml", "owned: true\n")]);
        let parent = tempdir().unwrap();
        let dest = parent.path().join("workspace").join("dashboard_1");
        fs::create_dir_all(&dest).unwrap();

        let result = unpack_bundle(&bytes, &dest, &[]);
        assert!(result.is_err());
        assert!(!parent.path().join("evil.yaml").exists());
        assert!(!parent.path().join("workspace").join("evil.yaml").exists());
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        let dir = tempdir().unwrap();
        let result = unpack_bundle(b"this is not a zip", dir.path(), &[]);
        assert!(result.is_err());
    }
}
