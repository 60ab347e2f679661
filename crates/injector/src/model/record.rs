//! Usercache records and the record set
//!
//! Field names and order match the usercache JSON schema exactly:
//! `name`, `uuid`, `expiresOn`. Values are kept as the strings read from
//! disk so that untouched records are written back byte-for-byte.

use chrono::{DateTime, FixedOffset};
use common::error::ValidationError;
use serde::{Deserialize, Serialize};

use super::expiry::parse_expiry;

/// One cached identity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Login name, unique within a record set (case-sensitive)
    pub name: String,
    /// Canonical grouped-hex identifier
    pub uuid: String,
    /// Expiry instant in the usercache expiry format
    #[serde(rename = "expiresOn")]
    pub expires_on: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        uuid: impl Into<String>,
        expires_on: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            expires_on: expires_on.into(),
        }
    }

    /// Parsed expiry instant
    pub fn expiry(&self) -> Result<DateTime<FixedOffset>, ValidationError> {
        parse_expiry(&self.expires_on)
    }
}

/// The full, ordered collection of records from one usercache file
///
/// Searches are linear and stop at the first match. Insertion order is the
/// serialized order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// First record whose name equals `name` exactly
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Mutable access to the first record whose name equals `name` exactly
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.name == name)
    }

    /// Whether any record already carries `identifier` (ASCII case-insensitive)
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.uuid.eq_ignore_ascii_case(identifier))
    }

    /// Appends `record` at the end of the set
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
