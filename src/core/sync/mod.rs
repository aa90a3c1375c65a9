//! Git → server sync pipeline

pub mod coordinator;
pub mod summary;

pub use coordinator::SyncCoordinator;
pub use summary::SyncSummary;
