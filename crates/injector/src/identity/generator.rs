//! Random identifier generation
//!
//! Identifiers are 128-bit values drawn uniformly from the whole space (no
//! version or variant bits are fixed) and rendered as 32 lower-case hex digits
//! grouped `8-4-4-4-12`.

use common::error::ValidationError;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Pattern of the canonical grouped-hex rendering
pub static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("Invalid identifier regex pattern")
});

/// Returns `true` if `value` is a canonical grouped-hex identifier
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(value)
}

/// A 128-bit identifier in canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Parses a canonical grouped-hex identifier
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if !is_valid_identifier(value) {
            return Err(ValidationError::InvalidFormat {
                field: "identifier".to_string(),
                value: value.to_string(),
            });
        }

        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "identifier".to_string(),
                value: value.to_string(),
            })
    }
}

impl FromStr for Identifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated rendering is zero-padded lower-case hex
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Produces uniformly random identifiers
///
/// No uniqueness is guaranteed here; callers regenerate on collision.
pub struct IdentifierGenerator {
    rng: Box<dyn RngCore + Send>,
}

impl IdentifierGenerator {
    /// Generator seeded from operating system entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Generator drawing from `rng`, for deterministic runs
    pub fn from_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    pub fn generate(&mut self) -> Identifier {
        Identifier::from_u128(self.rng.gen::<u128>())
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierGenerator").finish_non_exhaustive()
    }
}
