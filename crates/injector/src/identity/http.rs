//! HTTP identity validator backed by the account registry's profile API
//!
//! Each lookup is one GET with a bounded timeout. Only the status code is
//! inspected: the configured "present" code means the subject exists, an
//! "absent" code means it does not, and anything else is not authoritative.

use async_trait::async_trait;
use common::error::{ConfigurationError, NetworkError};
use common::journal::log_lookup_unknown;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use super::generator::Identifier;
use super::validator::{IdentityValidator, Lookup};
use crate::config::ValidationConfig;
use crate::model::is_valid_name;

/// Placeholder replaced by the looked-up subject in endpoint templates
pub const SUBJECT_PLACEHOLDER: &str = "{}";

/// Validator performing lookups against remote HTTPS endpoints
#[derive(Debug, Clone)]
pub struct HttpIdentityValidator {
    client: Client,
    name_endpoint: String,
    identifier_endpoint: String,
    present_status: u16,
    absent_status: Vec<u16>,
    timeout_secs: u64,
}

impl HttpIdentityValidator {
    /// Builds the validator and its HTTP client from `config`
    pub fn new(config: &ValidationConfig) -> Result<Self, ConfigurationError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("ucinjector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigurationError::InvalidValue {
                key: "validation".to_string(),
                value: "http_client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            name_endpoint: config.name_endpoint.clone(),
            identifier_endpoint: config.identifier_endpoint.clone(),
            present_status: config.present_status,
            absent_status: config.absent_status.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    async fn lookup(&self, template: &str, subject: &str) -> Lookup {
        match self.request(template, subject).await {
            Ok(lookup) => lookup,
            Err(e) => {
                log_lookup_unknown(subject, &e.to_string());
                Lookup::Unknown
            }
        }
    }

    async fn request(&self, template: &str, subject: &str) -> Result<Lookup, NetworkError> {
        let raw = template.replace(SUBJECT_PLACEHOLDER, subject);
        let url = Url::parse(&raw).map_err(|e| NetworkError::InvalidUrl {
            url: raw.clone(),
            details: e.to_string(),
        })?;

        debug!("Existence lookup: GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                NetworkError::connection_failed(raw.clone(), e)
            }
        })?;

        let status = response.status();
        if status.as_u16() == self.present_status {
            Ok(Lookup::ConfirmedPresent)
        } else if self.absent_status.contains(&status.as_u16()) {
            Ok(Lookup::ConfirmedAbsent)
        } else {
            Err(NetworkError::HttpError {
                status_code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            })
        }
    }
}

#[async_trait]
impl IdentityValidator for HttpIdentityValidator {
    async fn lookup_name(&self, name: &str) -> Lookup {
        // Anything outside the username alphabet could alter the URL path
        if !is_valid_name(name) {
            log_lookup_unknown(name, "name is not a valid username");
            return Lookup::Unknown;
        }
        self.lookup(&self.name_endpoint, name).await
    }

    async fn lookup_identifier(&self, identifier: &Identifier) -> Lookup {
        self.lookup(&self.identifier_endpoint, &identifier.to_string())
            .await
    }
}
