use super::{OptionsStore, StoreError, commit};
use crate::domain::models::Options;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryOptionsStore {
    options: Mutex<Options>,
    writes: Mutex<usize>,
}

impl MemoryOptionsStore {
    pub fn new(next_table_num: i64) -> Self {
        Self {
            options: Mutex::new(Options::new(next_table_num)),
            writes: Mutex::new(0),
        }
    }

    /// Number of committed writes, used to check that failed imports never write.
    pub fn writes(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

impl OptionsStore for MemoryOptionsStore {
    fn get_options(&self) -> Result<Options, StoreError> {
        let options = self.options.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(*options)
    }

    fn update_next_table_num(
        &self,
        expected_version: u64,
        next_table_num: i64,
    ) -> Result<Options, StoreError> {
        let mut options = self.options.lock().map_err(|_| StoreError::Poisoned)?;
        let committed = commit(*options, expected_version, next_table_num)?;
        *options = committed;
        *self.writes.lock().map_err(|_| StoreError::Poisoned)? += 1;
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_bumps_version() {
        let store = MemoryOptionsStore::new(4);
        let read = store.get_options().unwrap();
        assert_eq!(read, Options::new(4));
        let committed = store.update_next_table_num(read.version, 9).unwrap();
        assert_eq!(committed.next_table_num, 9);
        assert_eq!(committed.version, 1);
        assert_eq!(store.get_options().unwrap(), committed);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn stale_version_conflicts() {
        let store = MemoryOptionsStore::new(0);
        let first = store.get_options().unwrap();
        let second = store.get_options().unwrap();
        store.update_next_table_num(first.version, 5).unwrap();
        let err = store
            .update_next_table_num(second.version, 3)
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { expected: 0, found: 1 }));
        assert_eq!(store.get_options().unwrap().next_table_num, 5);
        assert_eq!(store.writes(), 1);
    }
}
