#![warn(missing_docs)]
//! Parser and daily aggregator for fuel-station SFT point-of-sale reports.
//!
//! An SFT file is a fixed-format, line-oriented plaintext shift report with
//! no formal grammar; this crate recovers structured sales figures from it by
//! literal-pattern matching, then sums every shift of one business date into
//! a single report for accounting reconciliation. One malformed file degrades
//! the day's aggregate but never aborts it.

mod aggregate;
mod error;
mod parser;
mod rules;
mod scanner;
mod service;
mod types;
mod utils;

pub use crate::aggregate::aggregate_outcomes;
pub use crate::error::{FailureReason, FileError, ParseFailure, StoreError};
pub use crate::parser::parse_report;
pub use crate::scanner::{LoyaltySection, ScanState, Section};
pub use crate::service::{
    AggregateOutcome, DirectoryStore, ReportService, ShiftFile, ShiftFileStore,
};
pub use crate::types::*;
