use crate::domain::errors::{ImportError, ImportResult};
use std::collections::HashSet;
use std::str::FromStr;

/// How long localities accumulate in a session's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalityScope {
    /// Kept for the life of the session.
    #[default]
    Process,
    /// Replaced by the values of each import once it committed.
    Import,
}

impl FromStr for LocalityScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "process" => Ok(Self::Process),
            "import" => Ok(Self::Import),
            other => anyhow::bail!("unknown locality scope '{}' (expected process or import)", other),
        }
    }
}

/// Ordered, append-only list of localities seen by imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityRegistry {
    values: Vec<i64>,
}

impl LocalityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, locality: i64) {
        self.values.push(locality);
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Localities parsed by one import, held back until the import commits.
#[derive(Debug, Default)]
pub struct BatchLocalities {
    staged: Vec<i64>,
    seen: Option<HashSet<i64>>,
}

impl BatchLocalities {
    /// Keeps every parsed value, repeats included.
    pub fn appending() -> Self {
        Self::default()
    }

    /// Keeps the first occurrence of each value within the batch.
    pub fn deduplicating() -> Self {
        Self {
            staged: Vec::new(),
            seen: Some(HashSet::new()),
        }
    }

    pub fn record(&mut self, locality: i64) {
        match self.seen.as_mut() {
            Some(seen) => {
                if seen.insert(locality) {
                    self.staged.push(locality);
                }
            }
            None => self.staged.push(locality),
        }
    }

    /// Appends the staged values to `registry`, returning how many were added.
    pub fn commit(self, registry: &mut LocalityRegistry) -> usize {
        let added = self.staged.len();
        registry.values.extend(self.staged);
        added
    }
}

/// Locality carried from row to row: a row without a locality reuses the
/// last one parsed earlier in the batch, or 0 when there was none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickyLocality {
    current: i64,
}

impl StickyLocality {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `field` when it is present and non-empty, returning the freshly
    /// parsed value. Absent or empty fields leave the carried value in place.
    pub fn observe(&mut self, field: Option<&str>) -> ImportResult<Option<i64>> {
        let value = match field {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };
        let locality = value.parse().map_err(|source| ImportError::Format {
            field: "locality",
            value: value.to_string(),
            source,
        })?;
        self.current = locality;
        Ok(Some(locality))
    }

    pub fn current(&self) -> i64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_from_str() {
        assert_eq!("process".parse::<LocalityScope>().unwrap(), LocalityScope::Process);
        assert_eq!(" Import ".parse::<LocalityScope>().unwrap(), LocalityScope::Import);
        assert!("session".parse::<LocalityScope>().is_err());
    }

    #[test]
    fn appending_batch_keeps_repeats() {
        let mut registry = LocalityRegistry::new();
        let mut batch = BatchLocalities::appending();
        for value in [5, 3, 5] {
            batch.record(value);
        }
        assert_eq!(batch.commit(&mut registry), 3);
        assert_eq!(registry.values(), &[5, 3, 5]);
    }

    #[test]
    fn deduplicating_batch_keeps_first_occurrence() {
        let mut registry = LocalityRegistry::new();
        registry.record(7);
        let mut batch = BatchLocalities::deduplicating();
        for value in [7, 2, 7, 2, 7] {
            batch.record(value);
        }
        assert_eq!(batch.commit(&mut registry), 2);
        assert_eq!(registry.values(), &[7, 7, 2]);
    }

    #[test]
    fn sticky_locality_carries_forward() {
        let mut sticky = StickyLocality::new();
        assert_eq!(sticky.observe(None).unwrap(), None);
        assert_eq!(sticky.current(), 0);
        assert_eq!(sticky.observe(Some("8")).unwrap(), Some(8));
        assert_eq!(sticky.observe(Some("")).unwrap(), None);
        assert_eq!(sticky.current(), 8);
        assert_eq!(sticky.observe(Some("2")).unwrap(), Some(2));
        assert_eq!(sticky.current(), 2);
    }

    #[test]
    fn sticky_locality_rejects_non_numbers() {
        let mut sticky = StickyLocality::new();
        sticky.observe(Some("3")).unwrap();
        let err = sticky.observe(Some("hall b")).unwrap_err();
        assert!(matches!(err, ImportError::Format { field: "locality", .. }));
        assert_eq!(sticky.current(), 3);
    }
}
