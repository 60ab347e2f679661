//! Remote existence checks for names and identifiers
//!
//! A lookup has three outcomes. Only `ConfirmedPresent` counts as "exists";
//! `Unknown` (timeouts, unexpected status codes, malformed input) is treated
//! as absent so that a flaky registry never blocks a run.

use async_trait::async_trait;

use super::generator::Identifier;

/// Outcome of a single existence lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The registry answered that the subject does not exist
    ConfirmedAbsent,
    /// The registry answered that the subject exists
    ConfirmedPresent,
    /// No authoritative answer was obtained
    Unknown,
}

impl Lookup {
    /// Fail-open policy: only a confirmed answer means "exists"
    pub fn exists(self) -> bool {
        matches!(self, Lookup::ConfirmedPresent)
    }

    pub fn is_authoritative(self) -> bool {
        !matches!(self, Lookup::Unknown)
    }
}

/// Answers whether a name or identifier belongs to a real registered account
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    /// Looks up a username
    async fn lookup_name(&self, name: &str) -> Lookup;

    /// Looks up an identifier
    async fn lookup_identifier(&self, identifier: &Identifier) -> Lookup;

    /// `true` only when the registry confirms the name exists
    async fn name_exists(&self, name: &str) -> bool {
        self.lookup_name(name).await.exists()
    }

    /// `true` only when the registry confirms the identifier exists
    async fn identifier_exists(&self, identifier: &Identifier) -> bool {
        self.lookup_identifier(identifier).await.exists()
    }
}
