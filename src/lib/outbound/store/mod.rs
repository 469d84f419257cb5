pub mod json_file;
pub mod memory;

pub use json_file::JsonFileOptionsStore;
pub use memory::MemoryOptionsStore;

use crate::domain::models::Options;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("options were changed concurrently: expected version {expected}, found {found}")]
    Conflict { expected: u64, found: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("options store lock poisoned")]
    Poisoned,
}

/// Persisted options shared by every import.
///
/// Imports read once and write once. The write is a compare-and-swap on
/// [`Options::version`]: it only commits when nobody else committed since the
/// read, otherwise it fails with [`StoreError::Conflict`] and the caller has
/// to rerun the whole import.
pub trait OptionsStore {
    fn get_options(&self) -> Result<Options, StoreError>;

    /// Replaces `next_table_num` if the stored version still equals
    /// `expected_version`, returning the committed options.
    fn update_next_table_num(
        &self,
        expected_version: u64,
        next_table_num: i64,
    ) -> Result<Options, StoreError>;
}

impl<S: OptionsStore + ?Sized> OptionsStore for &S {
    fn get_options(&self) -> Result<Options, StoreError> {
        (**self).get_options()
    }

    fn update_next_table_num(
        &self,
        expected_version: u64,
        next_table_num: i64,
    ) -> Result<Options, StoreError> {
        (**self).update_next_table_num(expected_version, next_table_num)
    }
}

pub(crate) fn commit(
    current: Options,
    expected_version: u64,
    next_table_num: i64,
) -> Result<Options, StoreError> {
    if current.version != expected_version {
        return Err(StoreError::Conflict {
            expected: expected_version,
            found: current.version,
        });
    }
    Ok(Options {
        next_table_num,
        version: current.version + 1,
    })
}
