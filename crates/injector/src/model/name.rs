//! Desired names
//!
//! A desired name is a username the operator wants present in the usercache.
//! Usernames are 3-16 characters of `A-Z`, `a-z`, `0-9` and `_`, and are
//! compared case-sensitively.

use common::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Minimum username length
pub const MIN_NAME_LENGTH: usize = 3;

/// Maximum username length
pub const MAX_NAME_LENGTH: usize = 16;

/// Pattern every desired name must match
pub static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,16}$").expect("Invalid username regex pattern"));

/// Returns `true` if `name` has the shape of a valid username
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// A validated candidate username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DesiredName(String);

impl DesiredName {
    /// Validates `name` and wraps it
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ValidationError::InvalidFormat {
                field: "username".to_string(),
                value: name,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DesiredName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DesiredName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DesiredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
