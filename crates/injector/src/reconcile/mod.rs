//! Merging desired names into a record set
//!
//! For every desired name, in input order, the reconciler either refreshes
//! the expiry of the existing record (keeping its identifier, since state
//! downstream is keyed by it) or appends a new record with a freshly minted,
//! collision-checked identifier. With remote validation enabled, names that
//! belong to real registered accounts are skipped entirely.
//!
//! Nothing here aborts the pass: remote failures degrade to fail-open answers
//! and processing always continues with the next name.

pub mod clock;

use common::error::ConfigurationError;
use common::journal::{
    log_identifier_collision, log_name_skipped, log_record_created, log_record_refreshed,
    log_retry_cap_reached,
};
use std::fmt;
use tracing::{debug, warn};

use crate::config::InjectorConfig;
use crate::identity::{Identifier, IdentifierGenerator, IdentityValidator, Lookup};
use crate::model::{expiry_after, format_expiry, DesiredName, Record, RecordSet};

pub use clock::{Clock, FixedClock, SystemClock};

/// Per-run reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Check names and new identifiers against the remote registry
    pub validate_remotely: bool,
    /// Calendar years between now and the written expiry
    pub validity_years: u32,
    /// Remote identifier lookups per new record before giving up on the registry
    pub max_identifier_attempts: u32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            validate_remotely: false,
            validity_years: crate::model::DEFAULT_VALIDITY_YEARS,
            max_identifier_attempts: 16,
        }
    }
}

impl From<&InjectorConfig> for ReconcileOptions {
    fn from(config: &InjectorConfig) -> Self {
        Self {
            validate_remotely: config.validation.enabled,
            validity_years: config.expiry.validity_years,
            max_identifier_attempts: config.validation.max_identifier_attempts,
        }
    }
}

/// What a reconciliation pass did, name by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Names whose existing record got a new expiry
    pub refreshed: Vec<String>,
    /// Names that received a new record
    pub created: Vec<String>,
    /// Names skipped because they belong to registered accounts
    pub skipped: Vec<String>,
    /// Remote lookups that produced no authoritative answer
    pub unverified_lookups: usize,
    /// Expiry written to every touched record
    pub expires_on: String,
}

impl ReconcileSummary {
    pub fn touched(&self) -> usize {
        self.refreshed.len() + self.created.len()
    }
}

impl fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Refreshed {}, created {}, skipped {} (expires on {})",
            self.refreshed.len(),
            self.created.len(),
            self.skipped.len(),
            self.expires_on
        )?;
        if self.unverified_lookups > 0 {
            write!(
                f,
                "; {} lookups were not authoritative, uniqueness is not guaranteed",
                self.unverified_lookups
            )?;
        }
        Ok(())
    }
}

/// Applies desired names to a record set
pub struct Reconciler {
    generator: IdentifierGenerator,
    validator: Option<Box<dyn IdentityValidator>>,
    clock: Box<dyn Clock>,
}

impl Reconciler {
    /// Reconciler with an entropy-seeded generator, the system clock and no
    /// remote validator
    pub fn new() -> Self {
        Self {
            generator: IdentifierGenerator::new(),
            validator: None,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_generator(mut self, generator: IdentifierGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_validator(mut self, validator: Box<dyn IdentityValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Merges `names` into `records` in place
    ///
    /// One expiry value is computed up front and shared by every record the
    /// pass touches. Records not named in `names` are left untouched. The only
    /// error is an expiry outside the date range, reported before any record
    /// changes.
    pub async fn reconcile(
        &mut self,
        records: &mut RecordSet,
        names: &[DesiredName],
        options: &ReconcileOptions,
    ) -> Result<ReconcileSummary, ConfigurationError> {
        let expiry = expiry_after(&self.clock.now(), options.validity_years).ok_or_else(|| {
            ConfigurationError::InvalidValue {
                key: "expiry.validity_years".to_string(),
                value: options.validity_years.to_string(),
                reason: "the resulting expiry date is out of range, choose a shorter window"
                    .to_string(),
            }
        })?;
        let expires_on = format_expiry(&expiry);
        let mut summary = ReconcileSummary {
            expires_on: expires_on.clone(),
            ..Default::default()
        };

        let validator = match (options.validate_remotely, self.validator.as_deref()) {
            (true, Some(validator)) => Some(validator),
            (true, None) => {
                warn!("Remote validation requested but no validator is configured; continuing without it");
                None
            }
            (false, _) => None,
        };

        debug!(
            "Reconciling {} desired names against {} records",
            names.len(),
            records.len()
        );

        for name in names {
            if let Some(validator) = validator {
                match validator.lookup_name(name.as_str()).await {
                    Lookup::ConfirmedPresent => {
                        log_name_skipped(name.as_str());
                        summary.skipped.push(name.to_string());
                        continue;
                    }
                    Lookup::Unknown => summary.unverified_lookups += 1,
                    Lookup::ConfirmedAbsent => {}
                }
            }

            if let Some(record) = records.find_mut(name.as_str()) {
                if let Ok(previous) = record.expiry() {
                    debug!(name = %name, previous = %previous, "Existing record found");
                }
                record.expires_on.clone_from(&expires_on);
                log_record_refreshed(&record.name, &record.uuid, &record.expires_on);
                summary.refreshed.push(name.to_string());
                continue;
            }

            let (identifier, attempts) = mint_identifier(
                &mut self.generator,
                validator,
                records,
                name,
                options.max_identifier_attempts,
                &mut summary,
            )
            .await;

            let record = Record::new(name.as_str(), identifier.to_string(), expires_on.as_str());
            log_record_created(&record.name, &record.uuid, &record.expires_on, attempts);
            records.push(record);
            summary.created.push(name.to_string());
        }

        Ok(summary)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates identifiers until one is free both locally and remotely
///
/// Local collisions always regenerate. Remote checks stop after
/// `max_remote_attempts` "exists" answers, at which point the registry is
/// considered unreliable and the next locally unique identifier is accepted.
/// Returns the identifier and the number of candidates drawn.
async fn mint_identifier(
    generator: &mut IdentifierGenerator,
    validator: Option<&dyn IdentityValidator>,
    records: &RecordSet,
    name: &DesiredName,
    max_remote_attempts: u32,
    summary: &mut ReconcileSummary,
) -> (Identifier, u32) {
    let mut attempts = 0;
    let mut remote_attempts = 0;

    loop {
        attempts += 1;
        let candidate = generator.generate();

        if records.contains_identifier(&candidate.to_string()) {
            log_identifier_collision(&candidate.to_string(), attempts, false);
            continue;
        }

        let Some(validator) = validator else {
            return (candidate, attempts);
        };

        if remote_attempts >= max_remote_attempts {
            log_retry_cap_reached(name.as_str(), remote_attempts);
            return (candidate, attempts);
        }
        remote_attempts += 1;

        match validator.lookup_identifier(&candidate).await {
            Lookup::ConfirmedPresent => {
                log_identifier_collision(&candidate.to_string(), attempts, true);
            }
            Lookup::Unknown => {
                summary.unverified_lookups += 1;
                return (candidate, attempts);
            }
            Lookup::ConfirmedAbsent => return (candidate, attempts),
        }
    }
}
