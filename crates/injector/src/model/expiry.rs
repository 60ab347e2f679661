//! Expiry timestamps
//!
//! The usercache stores expiry instants as `yyyy-MM-dd HH:mm:ss xx`, for
//! example `2026-10-15 12:30:00 +0200`.

use chrono::{DateTime, FixedOffset, Months};
use common::error::ValidationError;

/// strftime rendering of the usercache expiry format
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Default validity window for refreshed and created records
pub const DEFAULT_VALIDITY_YEARS: u32 = 2;

/// Largest accepted validity window
pub const MAX_VALIDITY_YEARS: u32 = 1000;

/// Renders `instant` in the usercache expiry format
pub fn format_expiry(instant: &DateTime<FixedOffset>) -> String {
    instant.format(EXPIRY_FORMAT).to_string()
}

/// Parses a usercache expiry string
///
/// Offsets written as hours only (`+00`) are accepted as well as `+0000`.
pub fn parse_expiry(value: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        field: "expiresOn".to_string(),
        value: value.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_str(value, EXPIRY_FORMAT) {
        return Ok(parsed);
    }

    // Hours-only offset: pad the minutes and retry
    let (_, offset) = value.rsplit_once(' ').ok_or_else(invalid)?;
    if offset.len() == 3 && (offset.starts_with('+') || offset.starts_with('-')) {
        return DateTime::parse_from_str(&format!("{value}00"), EXPIRY_FORMAT)
            .map_err(|_| invalid());
    }

    Err(invalid())
}

/// Returns the instant `years` calendar years after `now`, or `None` when
/// that instant is outside the representable date range
///
/// February 29 clamps to February 28 in non-leap target years.
pub fn expiry_after(now: &DateTime<FixedOffset>, years: u32) -> Option<DateTime<FixedOffset>> {
    now.checked_add_months(Months::new(years.checked_mul(12)?))
}
