use crate::domain::errors::{ImportError, ImportResult};

/// In-memory copy of the next free table number during one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounter {
    next: i64,
}

impl TableCounter {
    pub fn new(next: i64) -> Self {
        Self { next }
    }

    /// Jumps forward to `locality` if the counter is behind it, hands out the
    /// current number and advances by one. Fails without moving when no
    /// number would follow the one handed out.
    pub fn assign(&mut self, locality: i64) -> ImportResult<i64> {
        let table = self.next.max(locality);
        self.next = table
            .checked_add(1)
            .ok_or(ImportError::TableOverflow { table })?;
        Ok(table)
    }

    pub fn next(&self) -> i64 {
        self.next
    }
}
