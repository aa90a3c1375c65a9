//! External system integrations for supersync.
//!
//! - [`superset`] - Superset REST API client (login, list, export, import)
//! - [`git`] - change detection through `git status --porcelain`
//!
//! Adapters isolate external dependencies: no `reqwest` type and no raw
//! process output crosses out of this layer.

pub mod git;
pub mod superset;
