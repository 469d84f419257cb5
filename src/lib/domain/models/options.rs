use serde::{Deserialize, Serialize};

/// Persisted event options shared by every import.
///
/// `version` increases on every committed write and is the token used for
/// compare-and-swap updates of `next_table_num`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Options {
    pub next_table_num: i64,
    #[serde(default)]
    pub version: u64,
}

impl Options {
    pub fn new(next_table_num: i64) -> Self {
        Self {
            next_table_num,
            version: 0,
        }
    }
}
