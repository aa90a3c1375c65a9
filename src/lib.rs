// supersync - Superset asset export/import tool
// Copyright (c) 2025 supersync Contributors
// Licensed under the MIT License

//! # supersync - Superset asset export/import
//!
//! supersync is a CLI tool that keeps Apache Superset dashboards, charts and
//! datasets under git version control. It exports assets from a server into a
//! directory tree of unpacked YAML bundles, detects committed changes with
//! `git status`, and imports changed objects back into a target server.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Exporting** assets from Superset via the REST API into per-object
//!   directories (`superset_exports/dashboards/dashboard_9/...`)
//! - **Detecting** changed objects from `git status --porcelain`
//! - **Packing** changed object directories back into zip bundles
//! - **Importing** bundles into a server in dependency order
//!   (databases, datasets, charts, dashboards)
//!
//! ## Architecture
//!
//! supersync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, import, sync, archive handling)
//! - [`adapters`] - External integrations (Superset API, git)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use supersync::config::load_config;
//! use supersync::core::export::ExportCoordinator;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("supersync.toml")?;
//!     let (_tx, shutdown) = watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(config, shutdown).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} objects", summary.exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! supersync uses the [`domain::SupersyncError`] type for all errors:
//!
//! ```rust,no_run
//! use supersync::domain::SupersyncError;
//!
//! fn example() -> Result<(), SupersyncError> {
//!     let config = supersync::config::load_config("supersync.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! supersync uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(resource = "dashboard", id = 9, "Export failed, continuing");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
