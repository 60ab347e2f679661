//! The plain-text name list
//!
//! One candidate name per line. Surrounding whitespace is trimmed, blank
//! lines and `#` comments are ignored, and entries that are not valid
//! usernames are dropped with a warning.

use common::error::{ConfigurationError, PersistenceError};
use common::journal::log_name_rejected;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use super::NameSource;
use crate::model::DesiredName;

/// Content written to a freshly created default name list
pub const NAMES_FILE_TEMPLATE: &str = "# Add the usernames to inject into the usercache below, one per line. Lines starting with # are ignored.\n";

/// A name-list file that exists and is readable
#[derive(Debug, Clone)]
pub struct NamesFile {
    path: PathBuf,
}

impl NamesFile {
    /// Opens an explicitly requested name list, which must already exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let path = path.into();
        let shown = path.display().to_string();

        let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigurationError::FileNotFound {
                path: shown.clone(),
            },
            _ => ConfigurationError::ReadError {
                path: shown.clone(),
                source: Box::new(e),
            },
        })?;

        if !metadata.is_file() {
            return Err(ConfigurationError::NotAFile { path: shown });
        }

        fs::File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ConfigurationError::PermissionDenied {
                path: shown.clone(),
                access: "read".to_string(),
            },
            _ => ConfigurationError::ReadError {
                path: shown.clone(),
                source: Box::new(e),
            },
        })?;

        Ok(Self { path })
    }

    /// Opens the default name list, creating it with an explanatory comment
    /// when it does not exist yet
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let path = path.into();

        if !path.exists() {
            fs::write(&path, NAMES_FILE_TEMPLATE).map_err(|e| ConfigurationError::ReadError {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            info!(
                "Created name list {}; add usernames to it and run again",
                path.display()
            );
        }

        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameSource for NamesFile {
    fn load_names(&self) -> Result<Vec<DesiredName>, PersistenceError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::file_error(self.path.display().to_string(), e))?;
        let names = parse_names(&content);
        info!("Read {} names from {}", names.len(), self.path.display());
        Ok(names)
    }
}

/// Extracts valid names from name-list content, in file order
pub fn parse_names(content: &str) -> Vec<DesiredName> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                return None;
            }
            match DesiredName::new(entry) {
                Ok(name) => Some(name),
                Err(_) => {
                    log_name_rejected(index + 1, entry);
                    None
                }
            }
        })
        .collect()
}
