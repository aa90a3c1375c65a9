//! Command implementations

pub mod export;
pub mod import;
pub mod init;
pub mod status;
pub mod sync;
pub mod validate;
