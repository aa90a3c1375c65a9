//! Core business logic for supersync
//!
//! Pipelines are organized by direction: `export` pulls dashboards out of a
//! server into the workspace, `import` pushes staged bundles into a server,
//! and `sync` ties git change detection to the import path. `archive` holds
//! the zip bundle handling shared by all three.

pub mod archive;
pub mod export;
pub mod import;
pub mod sync;
