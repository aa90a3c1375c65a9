//! Change detection via `git status --porcelain`
//!
//! Exported objects live one directory per object under a resource
//! directory (`superset_exports/dashboards/dashboard_9/...`). After a pull,
//! the set of object directories containing any modified, added, deleted or
//! renamed file is exactly the set of objects that must be re-imported.
//!
//! Parsing is split from process execution so the porcelain format handling
//! can be tested without a git repository.

use crate::domain::{Result, SupersyncError};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::process::Command;

/// Run `git status --porcelain` at `repo_root` and return the changed
/// top-level object directories under `base_dir`
///
/// # Errors
///
/// Returns [`SupersyncError::Git`] if git cannot be spawned or exits
/// non-zero (e.g. `repo_root` is not a repository).
pub async fn changed_object_dirs(repo_root: &Path, base_dir: &Path) -> Result<BTreeSet<String>> {
    let output = Command::new("git")
        .arg("status")
        .arg("--porcelain")
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| SupersyncError::Git(format!("failed to run git status: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SupersyncError::Git(format!(
            "git status failed in {}: {}",
            repo_root.display(),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_changed_dirs(&stdout, base_dir))
}

/// Parse porcelain output into the set of changed top-level directories
/// under `base_dir`
///
/// `base_dir` must be relative to the repository root, the way git reports
/// paths. Renames (`R  old -> new`) count the rename target; quoted paths
/// (spaces, unicode) are unquoted.
pub fn parse_changed_dirs(porcelain: &str, base_dir: &Path) -> BTreeSet<String> {
    let mut changed = BTreeSet::new();

    for line in porcelain.lines() {
        // XY <path> with a two-character status and one separator space
        if line.len() < 4 {
            continue;
        }
        let path_field = &line[3..];

        // Renames and copies report "old -> new"; the new path is the one
        // that exists on disk now
        let path_str = match path_field.split_once(" -> ") {
            Some((_, new_path)) => new_path,
            None => path_field,
        };
        let path_str = unquote(path_str);

        // git collapses a fully untracked directory into one "<dir>/" entry,
        // which is what a freshly exported object looks like
        let is_dir_entry = path_str.ends_with('/');

        let path = Path::new(path_str.as_ref().trim_end_matches('/'));
        if let Ok(rel) = path.strip_prefix(base_dir) {
            let mut components = rel.components();
            if let Some(first) = components.next() {
                let name = first.as_os_str().to_string_lossy().into_owned();
                // A plain file directly under base_dir has no object
                // directory; a directory entry there is one
                if components.next().is_some() || is_dir_entry {
                    changed.insert(name);
                }
            }
        }
    }

    changed
}

/// Strip the surrounding quotes git adds around unusual paths
///
/// Octal escapes inside the quoted form are left as-is; object directory
/// names are ASCII (`dashboard_<id>`) so only the vendor YAML below them
/// could ever need unescaping, and those components are discarded anyway.
fn unquote(path: &str) -> std::borrow::Cow<'_, str> {
    if path.len() >= 2 && path.starts_with('"') && path.ends_with('"') {
        std::borrow::Cow::Owned(path[1..path.len() - 1].replace("\\\"", "\""))
    } else {
        std::borrow::Cow::Borrowed(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "superset_exports/dashboards";

    #[test]
    fn test_parse_collects_distinct_object_dirs() {
        let porcelain = "\
 M superset_exports/dashboards/dashboard_9/dashboard.yaml
 M superset_exports/dashboards/dashboard_9/metadata.yaml
?? superset_exports/dashboards/dashboard_12/charts/new.yaml
 M superset_exports/charts/chart_1/chart.yaml
";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert_eq!(
            changed.into_iter().collect::<Vec<_>>(),
            vec!["dashboard_12".to_string(), "dashboard_9".to_string()]
        );
    }

    #[test]
    fn test_parse_handles_renames() {
        let porcelain =
            "R  superset_exports/dashboards/dashboard_3/a.yaml -> superset_exports/dashboards/dashboard_4/a.yaml\n";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert_eq!(changed.into_iter().collect::<Vec<_>>(), vec!["dashboard_4"]);
    }

    #[test]
    fn test_parse_handles_quoted_paths() {
        let porcelain =
            "?? \"superset_exports/dashboards/dashboard_5/my chart.yaml\"\n";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert_eq!(changed.into_iter().collect::<Vec<_>>(), vec!["dashboard_5"]);
    }

    #[test]
    fn test_parse_detects_collapsed_untracked_object_dir() {
        // A first-time export produces a fully untracked directory, which
        // porcelain reports as a single collapsed entry
        let porcelain = "?? superset_exports/dashboards/dashboard_99/\n";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert_eq!(
            changed.into_iter().collect::<Vec<_>>(),
            vec!["dashboard_99"]
        );
    }

    #[test]
    fn test_parse_ignores_files_outside_base_dir() {
        let porcelain = " M README.md\n M superset_exports/charts/chart_2/chart.yaml\n";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert!(changed.is_empty());
    }

    #[test]
    fn test_parse_ignores_loose_files_in_base_dir() {
        let porcelain = " M superset_exports/dashboards/stray.yaml\n";
        let changed = parse_changed_dirs(porcelain, Path::new(BASE));
        assert!(changed.is_empty());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_changed_dirs("", Path::new(BASE)).is_empty());
    }

    #[tokio::test]
    async fn test_changed_object_dirs_outside_repository() {
        // The system temp dir is not a git repository
        let result = changed_object_dirs(
            std::env::temp_dir().as_path(),
            Path::new("superset_exports/dashboards"),
        )
        .await;

        assert!(result.is_err());
    }
}
