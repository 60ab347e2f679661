//! Data model of the usercache: records, desired names and expiry stamps

pub mod expiry;
pub mod name;
pub mod record;

pub use expiry::{
    expiry_after, format_expiry, parse_expiry, DEFAULT_VALIDITY_YEARS, EXPIRY_FORMAT,
    MAX_VALIDITY_YEARS,
};
pub use name::{is_valid_name, DesiredName};
pub use record::{Record, RecordSet};
