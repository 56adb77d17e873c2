//! Error types for descriptor validation and row scanning.

use thiserror::Error;

/// A table descriptor failed validation.
///
/// Each variant names exactly the precondition that was violated, so callers
/// never have to guess which field to fix. Validation is purely structural;
/// whether the table actually exists in the backing store is not checked
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing table name")]
    MissingTableName,
    #[error("missing error prefix")]
    MissingErrorPrefix,
    #[error("missing columns list")]
    MissingColumns,
    #[error("invalid column name at index {0}")]
    InvalidColumnName(usize),
}

/// A fetched row could not be decoded into the requested destination type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("column index {index} out of range for row of {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },
    #[error("column {index}: cannot read {found} as {expected}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}
