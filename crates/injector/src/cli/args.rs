//! CLI argument parsing and run configuration
//!
//! Arguments select the files a run works on and override configuration
//! values; `RunConfigResolver` turns them into a `RunConfig`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::InjectorConfig;

/// Main application arguments
#[derive(Parser, Debug)]
#[command(
    name = "ucinjector",
    author,
    version,
    about = "Inject offline usernames into a Minecraft server's usercache.json",
    long_about = "Adds a record for every username in the name list to usercache.json, \
                  refreshing the expiry of names that are already present. Names that \
                  are not registered with the account service can then log in to an \
                  offline-mode server without being evicted from the cache."
)]
pub struct InjectorArgs {
    /// Path to the usercache.json file to update
    pub usercache: PathBuf,

    /// Name list to inject [default: fakenames.txt next to the executable]
    #[arg(short, long, value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Check names and new identifiers against the account registry
    #[arg(short = 'c', long)]
    pub check_usernames: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl InjectorArgs {
    /// Parse arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Loads configuration from `--config` or the default locations
    pub fn load_config(&self) -> Result<InjectorConfig> {
        let mut config = match &self.config {
            Some(path) => InjectorConfig::load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => InjectorConfig::load().context("Failed to load configuration")?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Command-line values take precedence over every other layer
    pub fn apply_overrides(&self, config: &mut InjectorConfig) {
        if self.check_usernames {
            config.validation.enabled = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Where the name list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamesLocation {
    /// Given on the command line; must exist
    Explicit(PathBuf),
    /// Default location; created when missing
    Default(PathBuf),
}

impl NamesLocation {
    pub fn path(&self) -> &Path {
        match self {
            NamesLocation::Explicit(path) | NamesLocation::Default(path) => path,
        }
    }
}

/// Files a single run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub usercache: PathBuf,
    pub names: NamesLocation,
}

/// Run configuration resolver
pub struct RunConfigResolver;

impl RunConfigResolver {
    /// Resolve the run configuration from arguments and loaded configuration
    pub fn resolve(args: &InjectorArgs, config: &InjectorConfig) -> Result<RunConfig> {
        let names = match &args.names {
            Some(path) => NamesLocation::Explicit(path.clone()),
            None => NamesLocation::Default(default_names_path(&config.names.default_file_name)?),
        };

        Ok(RunConfig {
            usercache: args.usercache.clone(),
            names,
        })
    }
}

/// `file_name` in the directory holding the running executable
pub fn default_names_path(file_name: &str) -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot determine the executable location")?;
    let dir = exe
        .parent()
        .context("The executable location has no parent directory")?;
    Ok(dir.join(file_name))
}
