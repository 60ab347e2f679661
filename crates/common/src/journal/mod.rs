//! Structured logging built on tracing
//!
//! Console logging to stderr for the injector run, plus helpers that emit
//! the domain events of a reconciliation pass with consistent field names.

pub mod init;
pub mod logging;

// Re-export public API
pub use init::init_logging;
pub use logging::*;
