//! Single-file parse: one linear scan from raw SFT text to a sales record.

use crate::error::{FailureReason, ParseFailure};
use crate::rules;
use crate::scanner::ScanState;
use crate::types::{ParseOutcome, SalesRecord};

/// Parses the full text of one SFT shift report.
///
/// Lines are scanned in file order because header lines qualify the data
/// lines that follow them. Each line is offered to the scanner first (header
/// detection wins over value extraction), then to the rule table, where the
/// first matching rule performs at most one field update.
///
/// A file whose total, fuel and item sales all come out zero is rejected as
/// [`FailureReason::NoSalesData`]: a shift export with none of its primary
/// totals is noise, not a quiet day. No partial record is returned on
/// failure. The function reads nothing and writes nothing outside its
/// arguments.
pub fn parse_report(text: &str, file: &str) -> ParseOutcome {
    let mut record = SalesRecord::default();
    let mut state = ScanState::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if state.observe(line) {
            continue;
        }
        if let Some(value) = rules::extract(line) {
            value.apply(&mut record, &state);
        }
    }

    if record.has_no_sales() {
        return Err(ParseFailure {
            file: file.to_string(),
            reason: FailureReason::NoSalesData,
        });
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Money;

    fn dec(value: &str) -> Money {
        value.parse().expect("valid decimal literal")
    }

    #[test]
    fn parses_primary_totals() {
        let text = "Fuel sales 1000.00\nItem Sales 500.00\nTotal Sales 1500.00\n";
        let record = parse_report(text, "shift1.sft").expect("has sales data");
        assert_eq!(record.fuel_sales, dec("1000.00"));
        assert_eq!(record.item_sales, dec("500.00"));
        assert_eq!(record.total_sales, dec("1500.00"));
        assert_eq!(record.gst, Money::ZERO);
        assert_eq!(record.pos_visa, Money::ZERO);
    }

    #[test]
    fn all_zero_totals_is_no_sales_data() {
        let text = "STORE SUMMARY\nGST 5.00\nPayouts 10.00\n";
        let failure = parse_report(text, "empty.sft").expect_err("no sales data");
        assert_eq!(failure.reason, FailureReason::NoSalesData);
        assert_eq!(failure.file, "empty.sft");
    }

    #[test]
    fn empty_file_is_no_sales_data() {
        assert!(parse_report("", "blank.sft").is_err());
    }

    #[test]
    fn card_lines_route_by_active_section() {
        let text = "\
Total Sales 100.00
POS TOTALS
VISA 10 500.00 10 495.00
AFD CREDIT POS TOTALS
VISA 4 200.00 4 200.00
AFD DEBIT POS TOTALS
INTERAC 9 312.45
";
        let record = parse_report(text, "cards.sft").expect("has sales data");
        assert_eq!(record.pos_visa, dec("495.00"));
        assert_eq!(record.afd_visa, dec("200.00"));
        assert_eq!(record.afd_debit, dec("312.45"));
        assert_eq!(record.afd_debit_transaction_count, 9);
        assert_eq!(record.pos_debit, Money::ZERO);
    }

    #[test]
    fn caps_banner_closes_card_section() {
        let text = "\
Total Sales 100.00
POS TOTALS
STORE SUMMARY
VISA 10 500.00 10 500.00
";
        let record = parse_report(text, "reset.sft").expect("has sales data");
        assert_eq!(record.pos_visa, Money::ZERO);
    }

    #[test]
    fn loyalty_block_scopes_program_discount() {
        let text = "\
Total Sales 100.00
Aeroplan
Total loyalty discounts 12.34
Points earned 532
Total loyalty discounts 5.00
";
        let record = parse_report(text, "loyalty.sft").expect("has sales data");
        assert_eq!(record.aeroplan_discount, dec("12.34"));
        assert_eq!(record.journey_discount, Money::ZERO);
        // Both lines feed the program-independent accumulator.
        assert_eq!(record.loyalty_discounts, dec("17.34"));
    }

    #[test]
    fn repeated_loyalty_line_in_block_overwrites() {
        let text = "\
Total Sales 100.00
JOURNIE Rewards
Total loyalty discounts 10.00
Total loyalty discounts 7.50
Points earned
";
        let record = parse_report(text, "loyalty2.sft").expect("has sales data");
        assert_eq!(record.journey_discount, dec("7.50"));
        assert_eq!(record.loyalty_discounts, dec("17.50"));
    }

    #[test]
    fn department_totals_accumulate_per_bucket() {
        let text = "\
Total Sales 100.00
Department: 104 CIG SINGLE 25
Grand Total 10 10 $150.00
Grand Total 2 2 $30.00
Department: 210 LOTTO
Grand Total 5 5 $55.00
";
        let record = parse_report(text, "departments.sft").expect("has sales data");
        assert_eq!(record.tobacco_25, dec("180.00"));
        assert_eq!(record.lottery_total, dec("55.00"));
        assert_eq!(record.tobacco_20, Money::ZERO);
        assert_eq!(record.prepay_total, Money::ZERO);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let text = "   Total Sales 42.00   \r\n\r\n";
        let record = parse_report(text, "crlf.sft").expect("has sales data");
        assert_eq!(record.total_sales, dec("42.00"));
    }
}
