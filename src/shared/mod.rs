//! Shared utilities: error types, the crate-wide `Result` alias and
//! file-system safety checks.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
