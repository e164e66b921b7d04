//! Parse and aggregation errors for SFT shift reports.

use serde::Serialize;

/// Reason a single shift file could not be turned into a sales record.
///
/// File-scoped and always recoverable: the aggregation run records the
/// failure and moves on to the next file.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The file was missing or unreadable at read time.
    #[error("file could not be read: {0}")]
    Unreadable(String),
    /// The file scanned cleanly but total, fuel and item sales are all zero.
    #[error("no sales data found in file")]
    NoSalesData,
}

/// A failed parse of one shift file.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}: {reason}")]
pub struct ParseFailure {
    /// Original name of the offending file.
    pub file: String,
    /// Why the parse failed.
    pub reason: FailureReason,
}

/// Infrastructure error from the shift-file collaborator.
///
/// Unlike [`ParseFailure`] these are fatal to the aggregation call: if the
/// store cannot enumerate files or flip a processed flag there is nothing
/// sensible to degrade to.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// I/O error while listing or touching the backing storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// No shift file with the given id is known to the store.
    #[error("unknown shift file id {0}")]
    UnknownFile(u64),
}

/// One entry of the aggregated report's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    /// Original name of the file that failed.
    pub file: String,
    /// Human-readable failure reason.
    pub reason: String,
}

impl From<&ParseFailure> for FileError {
    fn from(failure: &ParseFailure) -> Self {
        Self {
            file: failure.file.clone(),
            reason: failure.reason.to_string(),
        }
    }
}
