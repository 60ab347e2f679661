//! # Configuration Abstractions
//!
//! Layered configuration loading and the configuration types shared by all
//! ucinjector components.

pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::*;
pub use types::*;
