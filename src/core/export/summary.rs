//! Export summary and reporting
//!
//! Structures for tracking and reporting the result of an export run.

use crate::domain::ResourceKind;
use std::time::Duration;

/// Classification of an export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Listing the resource collection failed
    Listing,
    /// Downloading an object's bundle failed
    Download,
    /// Unpacking a bundle to disk failed
    Unpack,
}

/// One error recorded during an export run
#[derive(Debug, Clone)]
pub struct ExportError {
    /// What stage failed
    pub error_type: ExportErrorType,

    /// Resource kind being processed, when known
    pub resource: Option<ResourceKind>,

    /// Object ID being processed, when known
    pub object_id: Option<u64>,

    /// Error message
    pub message: String,
}

impl ExportError {
    /// Creates a new export error
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            resource: None,
            object_id: None,
            message: message.into(),
        }
    }

    /// Sets the resource kind
    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Sets the object ID
    pub fn with_object_id(mut self, id: u64) -> Self {
        self.object_id = Some(id);
        self
    }
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Total number of objects seen in list responses
    pub total_objects: usize,

    /// Number of objects exported and unpacked successfully
    pub exported: usize,

    /// Number of objects that failed to export
    pub failed: usize,

    /// Number of objects whose directories came out identical
    pub unchanged: usize,

    /// Files written across all objects
    pub files_written: usize,

    /// Duration of the export
    pub duration: Duration,

    /// Whether the run was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_objects == 0 {
            return 100.0;
        }
        (self.exported as f64 / self.total_objects as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_objects = self.total_objects,
            exported = self.exported,
            failed = self.failed,
            unchanged = self.unchanged,
            files_written = self.files_written,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    resource = ?error.resource,
                    object_id = ?error.object_id,
                    message = %error.message,
                    "Export error"
                );
            }
        }
    }
}
