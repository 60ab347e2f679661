//! Layered configuration loading
//!
//! Values are merged in increasing priority: compiled defaults, the TOML
//! configuration file, then `UCINJECTOR_*` environment variables. Nested keys
//! use a double underscore, e.g. `UCINJECTOR_VALIDATION__ENABLED=true`.

use crate::error::ConfigurationError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ucinjector.toml";

/// Prefix of the environment variables overriding configuration values
pub const DEFAULT_ENV_PREFIX: &str = "UCINJECTOR";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "UCINJECTOR_CONFIG_PATH";

/// Per-user configuration file, relative to the home directory
const USER_CONFIG_PATH: &str = "~/.config/ucinjector/ucinjector.toml";

/// Where configuration is read from
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit configuration file; searched for when `None`
    pub config_path: Option<PathBuf>,
    /// Environment variable prefix, without the trailing underscore
    pub env_prefix: String,
    /// Fail when the configuration file does not exist
    pub require_file: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            require_file: false,
        }
    }
}

impl LoadOptions {
    /// Options for an explicitly named file, which must exist
    pub fn for_file(path: &Path) -> Self {
        Self {
            config_path: Some(path.to_path_buf()),
            require_file: true,
            ..Default::default()
        }
    }
}

/// Loads `T` from the default file locations and `UCINJECTOR_*` variables
pub fn load_config<T>() -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + Serialize,
{
    load_config_with_options(LoadOptions::default())
}

/// Loads `T` from `path`; environment overrides still apply on top
pub fn load_from_file<T>(path: &Path) -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + Serialize,
{
    load_config_with_options(LoadOptions::for_file(path))
}

pub fn load_config_with_options<T>(options: LoadOptions) -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + Serialize,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    let config_path = match options.config_path {
        Some(path) => Some(path),
        None => locate_config_file()?,
    };

    match config_path {
        Some(path) if path.exists() => {
            check_format(&path)?;
            info!("Loading configuration from {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
        Some(path) if options.require_file => {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Some(path) => warn!(
            "Configuration file {} not found, using defaults",
            path.display()
        ),
        None => debug!("No configuration file found, using defaults"),
    }

    figment
        .merge(
            Env::prefixed(&format!("{}_", options.env_prefix))
                .split("__")
                .ignore(&["CONFIG_PATH"]),
        )
        .extract()
        .map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })
}

/// `UCINJECTOR_CONFIG_PATH` when set, else the first existing file among the
/// working directory and the per-user location
fn locate_config_file() -> Result<Option<PathBuf>, ConfigurationError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(Some(PathBuf::from(path)));
    }

    let cwd = std::env::current_dir().map_err(|e| ConfigurationError::EnvironmentError {
        var: "current_dir".to_string(),
        details: e.to_string(),
    })?;
    let mut candidates = vec![cwd.join(DEFAULT_CONFIG_FILE)];
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(expand_path(USER_CONFIG_PATH, &home));
    }

    Ok(candidates.into_iter().find(|path| path.is_file()))
}

/// Only TOML files are understood; a missing extension is read as TOML
fn check_format(path: &Path) -> Result<(), ConfigurationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.eq_ignore_ascii_case("toml") => Err(ConfigurationError::ParseError {
            details: format!("unsupported configuration file format .{ext}, expected .toml"),
        }),
        _ => Ok(()),
    }
}

/// Expand a leading tilde to `home`
fn expand_path(path: &str, home: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) => PathBuf::from(format!("{home}{rest}")),
        None => PathBuf::from(path),
    }
}
