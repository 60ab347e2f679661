//! The usercache JSON file
//!
//! The file is a JSON array of `{name, uuid, expiresOn}` objects. It is read
//! whole and, after reconciliation, rewritten whole.

use common::error::{ConfigurationError, PersistenceError};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::RecordStore;
use crate::model::RecordSet;

/// File name the server uses for its usercache
pub const EXPECTED_FILE_NAME: &str = "usercache.json";

/// A usercache file that has passed the pre-run access checks
#[derive(Debug, Clone)]
pub struct UsercacheFile {
    path: PathBuf,
}

impl UsercacheFile {
    /// Checks that `path` is an existing, readable and writable regular file
    ///
    /// A file with an unexpected name only produces a warning.
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

        if path.file_name().and_then(|n| n.to_str()) != Some(EXPECTED_FILE_NAME) {
            warn!(
                "The usercache file {} is expected to be named {}; this usually means the wrong file was given. Continuing regardless",
                shown, EXPECTED_FILE_NAME
            );
        }

        check_access(&path, OpenOptions::new().read(true), "read")?;
        check_access(&path, OpenOptions::new().write(true), "write")?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for UsercacheFile {
    fn load(&self) -> Result<RecordSet, PersistenceError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::file_error(self.path.display().to_string(), e))?;
        let records = parse_records(&content, &self.path)?;
        info!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn persist(&self, records: &RecordSet) -> Result<(), PersistenceError> {
        let json = render_records(records)?;
        fs::write(&self.path, json)
            .map_err(|e| PersistenceError::file_error(self.path.display().to_string(), e))?;
        info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Parses usercache content; blank content is an empty record set
pub fn parse_records(content: &str, path: &Path) -> Result<RecordSet, PersistenceError> {
    if content.trim().is_empty() {
        warn!("{} is empty, starting from an empty record set", path.display());
        return Ok(RecordSet::new());
    }

    serde_json::from_str(content).map_err(|e| PersistenceError::DeserializationFailed {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Renders a record set as compact usercache JSON
pub fn render_records(records: &RecordSet) -> Result<String, PersistenceError> {
    serde_json::to_string(records).map_err(|e| PersistenceError::SerializationFailed {
        details: e.to_string(),
    })
}

/// Opens and immediately closes `path` with `options`, truncating nothing
fn check_access(
    path: &Path,
    options: &OpenOptions,
    access: &str,
) -> Result<(), ConfigurationError> {
    match options.open(path) {
        Ok(_) => {
            debug!("{} access to {} confirmed", access, path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(ConfigurationError::PermissionDenied {
                path: path.display().to_string(),
                access: access.to_string(),
            })
        }
        Err(e) => Err(ConfigurationError::ReadError {
            path: path.display().to_string(),
            source: Box::new(e),
        }),
    }
}
