//! Folding a date's per-file parse outcomes into one aggregated report.

use chrono::NaiveDate;

use crate::error::FileError;
use crate::types::{AggregatedReport, FileSummary, ParseOutcome, SalesRecord};

/// Sums every successful outcome into a fresh [`AggregatedReport`].
///
/// A failed file only bumps `files_with_errors` and lands in the error list;
/// it never aborts the fold. The numeric sums are order-independent, while
/// both audit lists preserve input order for human review.
#[must_use]
pub fn aggregate_outcomes(
    date: NaiveDate,
    outcomes: impl IntoIterator<Item = (String, ParseOutcome)>,
) -> AggregatedReport {
    let mut report = AggregatedReport {
        date,
        totals: SalesRecord::default(),
        files_processed: 0,
        files_with_errors: 0,
        processed_files: Vec::new(),
        errors: Vec::new(),
    };

    for (file, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                report.totals.accumulate(&record);
                report.files_processed += 1;
                report.processed_files.push(FileSummary { file, record });
            }
            Err(failure) => {
                report.files_with_errors += 1;
                report.errors.push(FileError::from(&failure));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FailureReason, ParseFailure};
    use crate::types::Money;

    fn dec(value: &str) -> Money {
        value.parse().expect("valid decimal literal")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 14).expect("valid date")
    }

    fn record(total: &str, safedrops: i64) -> SalesRecord {
        let mut record = SalesRecord::default();
        record.total_sales = dec(total);
        record.safedrops_count = safedrops;
        record
    }

    #[test]
    fn sums_fields_and_counts() {
        let outcomes = vec![
            ("a.sft".to_string(), Ok(record("100.10", 2))),
            ("b.sft".to_string(), Ok(record("200.15", 3))),
        ];
        let report = aggregate_outcomes(date(), outcomes);
        assert_eq!(report.totals.total_sales, dec("300.25"));
        assert_eq!(report.totals.safedrops_count, 5);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.files_with_errors, 0);
        assert_eq!(report.processed_files[0].file, "a.sft");
        assert_eq!(report.processed_files[1].file, "b.sft");
    }

    #[test]
    fn sums_are_permutation_independent() {
        let a = ("a.sft".to_string(), Ok(record("10.01", 1)));
        let b = ("b.sft".to_string(), Ok(record("20.02", 2)));
        let c = ("c.sft".to_string(), Ok(record("30.03", 3)));

        let forward = aggregate_outcomes(date(), vec![a.clone(), b.clone(), c.clone()]);
        let backward = aggregate_outcomes(date(), vec![c, b, a]);
        assert_eq!(forward.totals, backward.totals);
        // Audit order still follows input order.
        assert_eq!(forward.processed_files[0].file, "a.sft");
        assert_eq!(backward.processed_files[0].file, "c.sft");
    }

    #[test]
    fn failures_degrade_without_aborting() {
        let outcomes = vec![
            ("one.sft".to_string(), Ok(record("50.00", 0))),
            (
                "two.sft".to_string(),
                Err(ParseFailure {
                    file: "two.sft".to_string(),
                    reason: FailureReason::Unreadable("permission denied".to_string()),
                }),
            ),
            ("three.sft".to_string(), Ok(record("25.00", 1))),
        ];
        let report = aggregate_outcomes(date(), outcomes);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.files_with_errors, 1);
        assert_eq!(report.totals.total_sales, dec("75.00"));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].file, "two.sft");
        assert!(report.errors[0].reason.contains("permission denied"));
    }

    #[test]
    fn empty_input_yields_zeroed_report() {
        let report = aggregate_outcomes(date(), Vec::new());
        assert_eq!(report.files_processed, 0);
        assert_eq!(report.files_with_errors, 0);
        assert_eq!(report.totals, SalesRecord::default());
    }
}
