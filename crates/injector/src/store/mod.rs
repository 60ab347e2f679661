//! Loading and persisting the files a run works on

pub mod names;
pub mod usercache;

use common::error::PersistenceError;

use crate::model::{DesiredName, RecordSet};

pub use names::{parse_names, NamesFile, NAMES_FILE_TEMPLATE};
pub use usercache::{parse_records, render_records, UsercacheFile, EXPECTED_FILE_NAME};

/// Loads the record set at the start of a run and persists it at the end
pub trait RecordStore {
    fn load(&self) -> Result<RecordSet, PersistenceError>;
    fn persist(&self, records: &RecordSet) -> Result<(), PersistenceError>;
}

/// Supplies the filtered list of desired names
pub trait NameSource {
    fn load_names(&self) -> Result<Vec<DesiredName>, PersistenceError>;
}
