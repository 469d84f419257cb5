use super::{OptionsStore, StoreError, commit};
use crate::domain::models::Options;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Options persisted as a small JSON document.
///
/// Every update holds an exclusive lock on a sidecar `<file>.lock` for the
/// whole read-compare-write, so stores in other threads or processes pointing
/// at the same file serialize their commits and a stale one fails with
/// [`StoreError::Conflict`]. The document is written to a uniquely named temp
/// file in the same directory and renamed over the target, so a reader never
/// sees a half-written document.
#[derive(Debug)]
pub struct JsonFileOptionsStore {
    path: PathBuf,
}

impl JsonFileOptionsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Blocks until this handle holds the exclusive lock; dropping the
    /// returned file releases it.
    fn lock(&self) -> Result<File, StoreError> {
        std::fs::create_dir_all(self.dir())?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        lock_file.lock()?;
        Ok(lock_file)
    }

    fn read(&self) -> Result<Options, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No options file at {:?}, using defaults", self.path);
                return Ok(Options::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn write(&self, options: &Options) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        serde_json::to_writer_pretty(&mut tmp, options)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl OptionsStore for JsonFileOptionsStore {
    fn get_options(&self) -> Result<Options, StoreError> {
        self.read()
    }

    fn update_next_table_num(
        &self,
        expected_version: u64,
        next_table_num: i64,
    ) -> Result<Options, StoreError> {
        let _lock = self.lock()?;
        let committed = commit(self.read()?, expected_version, next_table_num)?;
        self.write(&committed)?;
        debug!(
            "Committed next table number {} (version {}) to {:?}",
            committed.next_table_num, committed.version, self.path
        );
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_defaults() {
        let dir = tempdir().unwrap();
        let store = JsonFileOptionsStore::new(dir.path().join("options.json"));
        assert_eq!(store.get_options().unwrap(), Options::default());
    }

    #[test]
    fn update_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("options.json");
        let store = JsonFileOptionsStore::new(&path);
        store.update_next_table_num(0, 42).unwrap();

        let reopened = JsonFileOptionsStore::new(&path);
        let options = reopened.get_options().unwrap();
        assert_eq!(options.next_table_num, 42);
        assert_eq!(options.version, 1);
    }

    #[test]
    fn stale_writer_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        let a = JsonFileOptionsStore::new(&path);
        let b = JsonFileOptionsStore::new(&path);
        let seen_by_a = a.get_options().unwrap();
        let seen_by_b = b.get_options().unwrap();
        a.update_next_table_num(seen_by_a.version, 10).unwrap();
        let err = b
            .update_next_table_num(seen_by_b.version, 7)
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(a.get_options().unwrap().next_table_num, 10);
    }

    #[test]
    fn racing_stores_never_lose_an_allocation() {
        const WORKERS: i64 = 8;
        const ALLOCATIONS: i64 = 5;
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");

        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = JsonFileOptionsStore::new(path);
                    let mut committed = 0;
                    while committed < ALLOCATIONS {
                        let seen = store.get_options().unwrap();
                        match store.update_next_table_num(seen.version, seen.next_table_num + 1) {
                            Ok(_) => committed += 1,
                            Err(StoreError::Conflict { .. }) => continue,
                            Err(e) => panic!("unexpected store error: {e}"),
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let options = JsonFileOptionsStore::new(&path).get_options().unwrap();
        assert_eq!(options.next_table_num, WORKERS * ALLOCATIONS);
        assert_eq!(options.version, (WORKERS * ALLOCATIONS) as u64);
        let mut leftovers: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        leftovers.sort();
        assert_eq!(leftovers, vec!["options.json", "options.json.lock"]);
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileOptionsStore::new(&path);
        assert!(matches!(store.get_options(), Err(StoreError::Serde(_))));
    }
}
