//! Import reporting

use crate::domain::ResourceKind;
use std::time::Duration;

/// One failed bundle within an import run
#[derive(Debug, Clone)]
pub struct ImportFailure {
    /// Resource kind of the bundle
    pub resource: ResourceKind,

    /// Bundle file name
    pub bundle: String,

    /// Error message
    pub message: String,
}

/// Summary of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Number of bundles found on disk
    pub total_bundles: usize,

    /// Number of bundles imported successfully
    pub imported: usize,

    /// Number of bundles that failed to import
    pub failed: usize,

    /// Number of zips deleted after successful import
    pub deleted: usize,

    /// Duration of the import
    pub duration: Duration,

    /// Whether the run was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Failures encountered during import
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every bundle imported successfully
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Record a failed bundle
    pub fn add_failure(&mut self, resource: ResourceKind, bundle: &str, message: String) {
        self.failed += 1;
        self.failures.push(ImportFailure {
            resource,
            bundle: bundle.to_string(),
            message,
        });
    }

    /// Log the report
    pub fn log_report(&self) {
        tracing::info!(
            total_bundles = self.total_bundles,
            imported = self.imported,
            failed = self.failed,
            deleted = self.deleted,
            duration_secs = self.duration.as_secs(),
            "Import completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                resource = %failure.resource,
                bundle = %failure.bundle,
                message = %failure.message,
                "Import failure"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_successful() {
        assert!(ImportReport::new().is_successful());
    }

    #[test]
    fn test_add_failure_marks_unsuccessful() {
        let mut report = ImportReport::new();
        report.add_failure(
            ResourceKind::Chart,
            "chart_1.zip",
            "status 422".to_string(),
        );

        assert!(!report.is_successful());
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].bundle, "chart_1.zip");
    }
}
