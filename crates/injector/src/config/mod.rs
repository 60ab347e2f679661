//! Configuration for the injector
//!
//! Sections are loaded through the common figment loader (defaults, then
//! `ucinjector.toml`, then `UCINJECTOR_*` variables) and validated before use.

pub mod types;
pub mod validation;

pub use types::*;
