//! # Common ucinjector
//!
//! Shared building blocks for the ucinjector crates.
//!
//! ## Key Features
//! - Error taxonomy with the `InjectorError` marker trait
//! - Layered configuration loading (defaults, TOML file, environment)
//! - Logging initialization and structured event helpers

pub mod config;
pub mod error;
pub mod journal;

// Re-export commonly used types at the crate root for convenience
pub use config::*;
pub use error::*;
