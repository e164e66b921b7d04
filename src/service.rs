//! Orchestration: list a date's shift files, parse each, fold, flag.

use std::collections::HashSet;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::aggregate::aggregate_outcomes;
use crate::error::{FailureReason, ParseFailure, StoreError};
use crate::parser::parse_report;
use crate::types::AggregatedReport;

/// One candidate shift file as the storage collaborator describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftFile {
    /// Storage-assigned identifier, used to flag the file processed.
    pub id: u64,
    /// Name the file was exported under, e.g. `SHIFT1.SFT`.
    pub original_name: String,
    /// Readable path to the extracted file contents.
    pub path: PathBuf,
}

/// Storage collaborator owning the shift files and their processed flags.
///
/// Upload, archive extraction and durable storage live behind this trait;
/// the report core only lists files and flips flags.
pub trait ShiftFileStore {
    /// Candidate files for one business date, in a stable order.
    fn files_for_date(&mut self, date: NaiveDate) -> Result<Vec<ShiftFile>, StoreError>;

    /// Records that a file's figures made it into an aggregate.
    fn mark_processed(&mut self, id: u64) -> Result<(), StoreError>;
}

/// Result of aggregating one business date.
#[derive(Debug)]
pub enum AggregateOutcome {
    /// At least one candidate file existed; the report sums the parseable ones.
    Report(AggregatedReport),
    /// No file for the date carried the `.sft` extension. Distinct from a
    /// report whose every file failed, which callers can see via
    /// `files_with_errors`.
    NoFilesFound,
}

impl AggregateOutcome {
    /// The aggregated report, if any files were found.
    #[must_use]
    pub fn report(&self) -> Option<&AggregatedReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::NoFilesFound => None,
        }
    }
}

/// Daily sales report service over some shift-file store.
#[derive(Debug)]
pub struct ReportService<S> {
    store: S,
}

impl<S: ShiftFileStore> ReportService<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives the store back, e.g. to inspect processed flags.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Parses and sums every `.sft` file recorded for `date`.
    ///
    /// Files are processed strictly sequentially, each read whole into
    /// memory. A file that cannot be read or carries no sales data is
    /// recorded in the report's error list and the run continues. Each
    /// success is flagged processed immediately, not transactionally across
    /// the whole run: an aborted run leaves flags reflecting exactly the
    /// files already parsed. Re-running against already-flagged files is
    /// allowed and re-parses them.
    ///
    /// Only store failures (listing, flag mutation) are returned as `Err`.
    pub fn aggregate(&mut self, date: NaiveDate) -> Result<AggregateOutcome, StoreError> {
        let candidates: Vec<ShiftFile> = self
            .store
            .files_for_date(date)?
            .into_iter()
            .filter(|file| has_sft_extension(&file.original_name))
            .collect();

        if candidates.is_empty() {
            info!(%date, "no shift files found");
            return Ok(AggregateOutcome::NoFilesFound);
        }

        let mut outcomes = Vec::with_capacity(candidates.len());
        for file in candidates {
            let outcome = match fs::read_to_string(&file.path) {
                Ok(text) => parse_report(&text, &file.original_name),
                Err(err) => Err(ParseFailure {
                    file: file.original_name.clone(),
                    reason: FailureReason::Unreadable(err.to_string()),
                }),
            };
            match &outcome {
                Ok(record) => {
                    info!(file = %file.original_name, total = %record.total_sales, "parsed shift file");
                    self.store.mark_processed(file.id)?;
                }
                Err(failure) => {
                    warn!(file = %file.original_name, reason = %failure.reason, "skipping shift file");
                }
            }
            outcomes.push((file.original_name, outcome));
        }

        Ok(AggregateOutcome::Report(aggregate_outcomes(
            date, outcomes,
        )))
    }
}

/// Case-insensitive `.sft` extension check on the exported name.
fn has_sft_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sft"))
}

/// Filesystem-backed store: one subdirectory per business date under a root,
/// named `YYYY-MM-DD`. Processed flags are kept in memory; durable flags are
/// the real storage collaborator's concern.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    known: HashSet<u64>,
    processed: HashSet<u64>,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            known: HashSet::new(),
            processed: HashSet::new(),
        }
    }

    /// Whether a file id from the last listing has been flagged processed.
    #[must_use]
    pub fn is_processed(&self, id: u64) -> bool {
        self.processed.contains(&id)
    }
}

impl ShiftFileStore for DirectoryStore {
    fn files_for_date(&mut self, date: NaiveDate) -> Result<Vec<ShiftFile>, StoreError> {
        let dir = self.root.join(date.format("%Y-%m-%d").to_string());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)?
            .filter_map(std::result::Result::ok)
            .collect();
        // Deterministic file order across platforms.
        entries.sort_by_key(DirEntry::path);

        let mut files = Vec::new();
        let mut next_id = 0u64;
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            next_id += 1;
            let id = next_id;
            self.known.insert(id);
            files.push(ShiftFile {
                id,
                original_name: name.to_string(),
                path,
            });
        }
        Ok(files)
    }

    fn mark_processed(&mut self, id: u64) -> Result<(), StoreError> {
        if !self.known.contains(&id) {
            return Err(StoreError::UnknownFile(id));
        }
        self.processed.insert(id);
        Ok(())
    }
}
