//! Error handling for ucinjector
//!
//! This module defines the error taxonomy shared by every ucinjector component:
//! - `InjectorError` marker trait for consistent error handling
//! - Configuration errors (fatal, reported before any reconciliation work)
//! - Persistence errors (reading or rewriting the record-set file)
//! - Network errors (remote identity lookups, never fatal)
//! - Validation errors (malformed names and identifiers)
//!
//! Library code returns these `thiserror` types; the binary wraps them in
//! `anyhow` with additional context.

use thiserror::Error;

/// Base trait for all ucinjector-specific errors
///
/// All errors are thread-safe, own their data and implement the standard
/// `Error` trait, so they can cross async boundaries and be boxed freely.
pub trait InjectorError: std::error::Error + Send + Sync + 'static {}

/// Configuration-related errors
///
/// Missing, unreadable or unwritable files and invalid settings. These are
/// fatal and each message carries a remediation hint for the operator.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// File does not exist
    #[error("The file {path} does not exist. Check the path and try again")]
    FileNotFound { path: String },

    /// Path exists but is not a regular file
    #[error("The path {path} exists but is not a file. Please choose another file path")]
    NotAFile { path: String },

    /// Path lacks the permissions needed for the run
    #[error("The file {path} is missing {access} permission. Use something like `chmod` to change the file permissions")]
    PermissionDenied { path: String, access: String },

    /// File cannot be read
    #[error("Cannot read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    /// Environment variable error
    #[error("Environment variable error for {var}: {details}")]
    EnvironmentError { var: String, details: String },
}

impl InjectorError for ConfigurationError {}

/// Persistence errors
///
/// These occur while reading the record-set or name-list files, or while
/// rewriting the record-set file at the end of a run.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// File I/O error
    #[error("File I/O error for {path}: {source}")]
    FileError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization failed
    #[error("Serialization failed: {details}")]
    SerializationFailed { details: String },

    /// Deserialization failed
    #[error("Deserialization of {path} failed: {details}. Make sure the file is a usercache JSON array")]
    DeserializationFailed { path: String, details: String },
}

impl InjectorError for PersistenceError {}

/// Network-related errors
///
/// Raised by remote identity lookups. Callers map every one of these to a
/// non-authoritative answer instead of aborting the run.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed to establish
    #[error("Failed to connect to {endpoint}: {source}")]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Unexpected HTTP status
    #[error("HTTP error {status_code}: {message}")]
    HttpError { status_code: u16, message: String },

    /// Lookup URL could not be built
    #[error("Invalid lookup URL {url}: {details}")]
    InvalidUrl { url: String, details: String },
}

impl InjectorError for NetworkError {}

/// Validation errors
///
/// These errors occur during input validation or data format checking.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid input format
    #[error("Invalid {field} format: {value}")]
    InvalidFormat { field: String, value: String },
}

impl InjectorError for ValidationError {}

impl NetworkError {
    /// Create a connection failed error from any error type
    pub fn connection_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConnectionFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

impl PersistenceError {
    /// Create a file error for `path` from any error type
    pub fn file_error(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FileError {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
