//! Structured logging functions

use tracing::{debug, error, info, warn};

/// Log a desired name that belongs to a real registered account
pub fn log_name_skipped(name: &str) {
    warn!(
        name = %name,
        "Name is registered to a real account and will be skipped; remove it from the name list to avoid unnecessary lookups"
    );
}

/// Log a desired name whose existing record had its expiry refreshed
pub fn log_record_refreshed(name: &str, identifier: &str, expires_on: &str) {
    info!(
        name = %name,
        identifier = %identifier,
        expires_on = %expires_on,
        "Refreshed existing record"
    );
}

/// Log a desired name that received a brand-new record
pub fn log_record_created(name: &str, identifier: &str, expires_on: &str, attempts: u32) {
    info!(
        name = %name,
        identifier = %identifier,
        expires_on = %expires_on,
        attempts = attempts,
        "Created new record"
    );
}

/// Log a generated identifier that was already taken
pub fn log_identifier_collision(identifier: &str, attempt: u32, remote: bool) {
    if remote {
        warn!(
            identifier = %identifier,
            attempt = attempt,
            "Generated identifier is registered remotely, regenerating"
        );
    } else {
        debug!(
            identifier = %identifier,
            attempt = attempt,
            "Generated identifier already present in record set, regenerating"
        );
    }
}

/// Log a remote lookup that produced no authoritative answer
pub fn log_lookup_unknown(subject: &str, reason: &str) {
    warn!(
        subject = %subject,
        reason = %reason,
        "Existence lookup was not authoritative; continuing as if absent, uniqueness is not guaranteed"
    );
}

/// Log that the remote authority kept answering "exists" past the attempt cap
pub fn log_retry_cap_reached(name: &str, attempts: u32) {
    error!(
        name = %name,
        attempts = attempts,
        "Remote identifier lookup answered 'exists' on every attempt; treating it as unreliable and accepting a locally unique identifier"
    );
}

/// Log a name-list entry that does not have the shape of a valid name
pub fn log_name_rejected(line_number: usize, entry: &str) {
    warn!(
        line = line_number,
        entry = %entry,
        "Ignoring name that does not match the username format (3-16 characters of A-Z, a-z, 0-9, _)"
    );
}
