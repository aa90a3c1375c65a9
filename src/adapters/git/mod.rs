//! Git integration for change detection
//!
//! The exported working tree is a git repository; `git status --porcelain`
//! tells us which object directories changed since the last commit.

pub mod status;

pub use status::{changed_object_dirs, parse_changed_dirs};
