//! Superset server integration
//!
//! [`SupersetClient`] wraps the REST endpoints supersync relies on:
//! login, CSRF token, paginated listing, export and import.

pub mod client;
pub mod models;

pub use client::SupersetClient;
pub use models::{ListResponse, ResourceSummary};
