//! Domain error types
//!
//! This module defines the error hierarchy for supersync. All errors are
//! domain-specific and don't expose third-party types such as `reqwest`
//! or `zip` errors.

use thiserror::Error;

/// Main supersync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SupersyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Superset API errors
    #[error("Superset error: {0}")]
    Superset(#[from] SupersetError),

    /// Archive (zip bundle) errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Git change-detection errors
    #[error("Git error: {0}")]
    Git(String),

    /// Export pipeline errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import pipeline errors
    #[error("Import error: {0}")]
    Import(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Superset-specific errors
///
/// Errors that occur when talking to a Superset server. These errors don't
/// expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum SupersetError {
    /// Failed to connect to the Superset server
    #[error("Failed to connect to Superset server: {0}")]
    ConnectionFailed(String),

    /// Login or token refresh failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// CSRF token could not be obtained
    #[error("Failed to obtain CSRF token: {0}")]
    CsrfTokenFailed(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Listing a resource collection failed
    #[error("Failed to list {resource}: {message}")]
    ListFailed { resource: String, message: String },

    /// Exporting an object failed
    #[error("Failed to export {resource} {id}: {message}")]
    ExportFailed {
        resource: String,
        id: u64,
        message: String,
    },

    /// Importing a bundle failed
    #[error("Failed to import {name}: {message}")]
    ImportFailed { name: String, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Archive-specific errors
///
/// Errors raised while packing or unpacking Superset export bundles.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The response body was not a readable zip archive
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// The object directory to pack does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// An entry could not be read from the archive
    #[error("Failed to read archive entry {entry}: {message}")]
    EntryReadFailed { entry: String, message: String },

    /// A file could not be written to disk
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for SupersyncError {
    fn from(err: std::io::Error) -> Self {
        SupersyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SupersyncError {
    fn from(err: serde_json::Error) -> Self {
        SupersyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SupersyncError {
    fn from(err: toml::de::Error) -> Self {
        SupersyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from zip errors, via the archive variant
impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::InvalidArchive(err.to_string())
    }
}
