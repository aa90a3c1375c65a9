//! Sync summary reporting

use crate::core::import::ImportReport;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a sync run
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Changed object directories detected from git status
    pub changed: usize,
    /// Bundles staged for import
    pub zipped: usize,
    /// Changed objects that could not be packed
    pub pack_failures: usize,
    /// Result of the import step, when it ran
    pub import: Option<ImportReport>,
    /// Total duration
    pub duration: Duration,
    /// Whether the run was interrupted by a shutdown signal
    pub interrupted: bool,
}

impl SyncSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            changed: 0,
            zipped: 0,
            pack_failures: 0,
            import: None,
            duration: Duration::ZERO,
            interrupted: false,
        }
    }

    /// True when everything detected made it into the server
    pub fn is_successful(&self) -> bool {
        !self.interrupted
            && self.pack_failures == 0
            && self.import.as_ref().map_or(true, |r| r.is_successful())
    }

    /// Log the summary
    pub fn log_summary(&self) {
        let imported = self.import.as_ref().map_or(0, |r| r.imported);
        let failed = self.import.as_ref().map_or(0, |r| r.failed);
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            changed = self.changed,
            zipped = self.zipped,
            pack_failures = self.pack_failures,
            imported = imported,
            import_failures = failed,
            duration_secs = self.duration.as_secs_f64(),
            interrupted = self.interrupted,
            "Sync complete"
        );
    }
}

impl Default for SyncSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_summary_is_successful() {
        let summary = SyncSummary::new();
        assert!(summary.is_successful());
        assert_eq!(summary.changed, 0);
        assert!(summary.import.is_none());
    }

    #[test]
    fn test_pack_failure_marks_unsuccessful() {
        let mut summary = SyncSummary::new();
        summary.changed = 2;
        summary.zipped = 1;
        summary.pack_failures = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_import_failure_marks_unsuccessful() {
        let mut summary = SyncSummary::new();
        summary.changed = 1;
        summary.zipped = 1;
        let mut report = ImportReport::new();
        report.total_bundles = 1;
        report.failed = 1;
        summary.import = Some(report);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_interrupted_marks_unsuccessful() {
        let mut summary = SyncSummary::new();
        summary.interrupted = true;
        assert!(!summary.is_successful());
    }
}
