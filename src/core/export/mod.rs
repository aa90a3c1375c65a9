//! Export orchestration
//!
//! - [`ExportCoordinator`] drives the list → download → unpack pipeline
//! - [`ExportSummary`] reports what a run did

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
