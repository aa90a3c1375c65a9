//! Domain models and types for supersync.
//!
//! The domain layer provides:
//! - **Resource kinds** ([`ResourceKind`]) mapping Superset API names to
//!   working-tree directories
//! - **Error types** ([`SupersyncError`], [`SupersetError`], [`ArchiveError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations return [`Result<T>`]; errors convert with `?`:
//!
//! ```rust
//! use supersync::domain::{Result, SupersyncError};
//!
//! fn example() -> Result<()> {
//!     Err(SupersyncError::Validation("bad input".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod errors;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ArchiveError, SupersetError, SupersyncError};
pub use resource::ResourceKind;
pub use result::Result;
