use crate::outbound::store::StoreError;
use std::num::ParseIntError;
use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Malformed record (expected {expected}): '{record}'")]
    MalformedRecord { expected: String, record: String },

    #[error("Invalid number in {field} column: '{value}': {source}")]
    Format {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Table number {table} is the largest representable; no table follows it")]
    TableOverflow { table: i64 },

    #[error("Options store error: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    pub(crate) fn malformed(expected: impl Into<String>, record: &[String]) -> Self {
        Self::MalformedRecord {
            expected: expected.into(),
            record: record.join(","),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },

    #[error("line {line}, column {column}: bare \" in non-quoted field")]
    BareQuote { line: usize, column: usize },

    #[error("line {line}, column {column}: extraneous or missing \" in quoted field")]
    ExtraneousQuote { line: usize, column: usize },
}
