//! Import orchestration
//!
//! - [`ImportRunner`] uploads staged zip bundles in dependency order
//! - [`ImportReport`] reports what a run did

pub mod report;
pub mod runner;

pub use report::{ImportFailure, ImportReport};
pub use runner::{find_zips, ImportRunner};
