//! Export bundle archive handling
//!
//! Superset moves assets around as zip bundles of vendor YAML files.
//! [`unpack_bundle`] mirrors a bundle into a stable object directory;
//! [`pack_object_dir`] turns such a directory back into an importable
//! bundle.

pub mod pack;
pub mod unpack;

pub use pack::pack_object_dir;
pub use unpack::{unpack_bundle, UnpackOutcome};
