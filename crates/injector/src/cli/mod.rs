//! CLI interface for ucinjector

pub mod args;

// Re-export key types for convenience
pub use args::{
    default_names_path, InjectorArgs, NamesLocation, RunConfig, RunConfigResolver,
};
