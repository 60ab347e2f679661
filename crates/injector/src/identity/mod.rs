//! Identifier generation and remote identity validation
//!
//! - `generator`: uniformly random 128-bit identifiers in canonical form
//! - `validator`: the `IdentityValidator` seam and its three-valued `Lookup`
//! - `http`: the registry-backed validator used when validation is enabled

pub mod generator;
pub mod http;
pub mod validator;

pub use generator::{is_valid_identifier, Identifier, IdentifierGenerator};
pub use http::HttpIdentityValidator;
pub use validator::{IdentityValidator, Lookup};
