//! Packing object directories into import bundles
//!
//! The import endpoint expects the zip to contain the object directory as
//! its top-level folder (`dashboard_9/metadata.yaml`, not `metadata.yaml`),
//! so entries are named relative to the object directory's parent.

use crate::domain::errors::ArchiveError;
use crate::domain::Result;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip one object directory into `output_zip`, keeping the directory name
/// as the top-level folder inside the archive
///
/// Entries are walked in sorted order so repeated packs of the same tree
/// produce identical archives.
///
/// # Errors
///
/// Returns [`ArchiveError::DirectoryNotFound`] if `object_dir` is not a
/// directory, and [`ArchiveError::WriteFailed`] on I/O failures.
pub fn pack_object_dir(object_dir: &Path, output_zip: &Path) -> Result<PathBuf> {
    if !object_dir.is_dir() {
        return Err(ArchiveError::DirectoryNotFound(object_dir.display().to_string()).into());
    }

    // Arcnames are relative to the parent so `dashboard_9/` prefixes
    // every entry
    let base = object_dir.parent().unwrap_or_else(|| Path::new(""));

    if let Some(parent) = output_zip.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ArchiveError::WriteFailed {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    let file = File::create(output_zip).map_err(|e| ArchiveError::WriteFailed {
        path: output_zip.display().to_string(),
        message: e.to_string(),
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(object_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let arcname = path
            .strip_prefix(base)
            .map_err(|e| ArchiveError::InvalidArchive(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        zip.start_file(arcname, options)
            .map_err(ArchiveError::from)?;

        let mut source = File::open(path).map_err(|e| ArchiveError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        io::copy(&mut source, &mut zip).map_err(|e| ArchiveError::WriteFailed {
            path: output_zip.display().to_string(),
            message: e.to_string(),
        })?;
    }

    zip.finish().map_err(ArchiveError::from)?;

    tracing::debug!(
        object_dir = %object_dir.display(),
        output = %output_zip.display(),
        "Packed object directory"
    );

    Ok(output_zip.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    #[test]
    fn test_pack_keeps_object_dir_as_top_level() {
        let dir = tempdir().unwrap();
        let object_dir = dir.path().join("dashboard_9");
        fs::create_dir_all(object_dir.join("charts")).unwrap();
        fs::write(object_dir.join("metadata.yaml"), "version: 1.0.0\n").unwrap();
        fs::write(object_dir.join("charts/sales.yaml"), "slice_name: Sales\n").unwrap();

        let zip_path = dir.path().join("out/dashboard_9.zip");
        let written = pack_object_dir(&object_dir, &zip_path).unwrap();
        assert_eq!(written, zip_path);

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(names.contains(&"dashboard_9/metadata.yaml".to_string()));
        assert!(names.contains(&"dashboard_9/charts/sales.yaml".to_string()));

        let mut content = String::new();
        archive
            .by_name("dashboard_9/metadata.yaml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "version: 1.0.0\n");
    }

    #[test]
    fn test_pack_missing_directory() {
        let dir = tempdir().unwrap();
        let result = pack_object_dir(&dir.path().join("chart_404"), &dir.path().join("out.zip"));

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Directory not found"));
    }

    #[test]
    fn test_pack_is_deterministic() {
        let dir = tempdir().unwrap();
        let object_dir = dir.path().join("chart_1");
        fs::create_dir_all(&object_dir).unwrap();
        fs::write(object_dir.join("b.yaml"), "b\n").unwrap();
        fs::write(object_dir.join("a.yaml"), "a\n").unwrap();

        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");
        pack_object_dir(&object_dir, &first).unwrap();
        pack_object_dir(&object_dir, &second).unwrap();

        let archive = ZipArchive::new(File::open(&first).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert_eq!(names, vec!["chart_1/a.yaml", "chart_1/b.yaml"]);
        drop(archive);

        // Same tree, same order
        let second_archive = ZipArchive::new(File::open(&second).unwrap()).unwrap();
        let second_names: Vec<String> = second_archive.file_names().map(String::from).collect();
        assert_eq!(names, second_names);
    }
}
