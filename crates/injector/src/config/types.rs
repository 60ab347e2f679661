//! Core configuration types and main injector configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use common::config::{loader, LoggingConfig};

use crate::model::DEFAULT_VALIDITY_YEARS;

/// Main injector configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjectorConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Validity window written into refreshed and created records
    pub expiry: ExpiryConfig,

    /// Remote name and identifier validation
    pub validation: ValidationConfig,

    /// Name-list file settings
    pub names: NamesConfig,
}

impl InjectorConfig {
    /// Load configuration using common loader
    pub fn load() -> Result<Self> {
        Ok(loader::load_config::<Self>()?)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Ok(loader::load_from_file::<Self>(path)?)
    }
}

/// Expiry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Calendar years added to the current time
    pub validity_years: u32,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            validity_years: DEFAULT_VALIDITY_YEARS,
        }
    }
}

/// Remote validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Whether names and new identifiers are checked remotely
    pub enabled: bool,

    /// Name lookup URL, `{}` is replaced by the name
    pub name_endpoint: String,

    /// Identifier lookup URL, `{}` is replaced by the identifier
    pub identifier_endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Status code meaning "exists"
    pub present_status: u16,

    /// Status codes meaning "does not exist"
    pub absent_status: Vec<u16>,

    /// Remote identifier lookups per new record before the registry is
    /// treated as unreliable
    pub max_identifier_attempts: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name_endpoint: "https://api.mojang.com/users/profiles/minecraft/{}".to_string(),
            identifier_endpoint: "https://api.mojang.com/user/profiles/{}/names".to_string(),
            timeout_secs: 5,
            present_status: 200,
            absent_status: vec![204],
            max_identifier_attempts: 16,
        }
    }
}

/// Name-list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesConfig {
    /// File name looked up next to the executable when no path is given
    pub default_file_name: String,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            default_file_name: "fakenames.txt".to_string(),
        }
    }
}

