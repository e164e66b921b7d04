//! Domain types for shift sales records and the daily aggregate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{FileError, ParseFailure};

/// Monetary value, kept as `Decimal` for exact accounting arithmetic.
pub type Money = Decimal;

/// Outcome of parsing one shift file.
pub type ParseOutcome = Result<SalesRecord, ParseFailure>;

/// Card brand appearing in the POS and AFD totals sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    /// VISA credit.
    Visa,
    /// MASTERCARD credit.
    Mastercard,
    /// AMEX credit.
    Amex,
    /// COMMERCIAL fleet cards.
    Commercial,
    /// UP CREDIT house card.
    UpCredit,
    /// DISCOVER credit.
    Discover,
}

/// Structured sales figures recovered from one SFT shift report.
///
/// Every field a file does not mention stays zero. The parser enforces no
/// cross-field arithmetic: `total_sales` may legitimately disagree with
/// `fuel_sales + item_sales + gst + penny_rounding`; reconciliation is a
/// downstream concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    /// Grand total of the shift.
    pub total_sales: Money,
    /// Fuel portion of sales.
    pub fuel_sales: Money,
    /// In-store item portion of sales.
    pub item_sales: Money,
    /// GST collected.
    pub gst: Money,
    /// Cash rounding adjustment.
    pub penny_rounding: Money,
    /// Total rung through the POS.
    pub total_pos: Money,
    /// Canadian cash taken.
    pub canadian_cash: Money,
    /// GST component of fuel tax.
    pub fuel_tax_gst: Money,
    /// Cash paid out of the till.
    pub payouts: Money,
    /// All loyalty discounts granted, regardless of program.
    pub loyalty_discounts: Money,

    /// Number of safedrop envelopes.
    pub safedrops_count: i64,
    /// Total value of safedrops.
    pub safedrops_amount: Money,
    /// Cash remaining in the till.
    pub cash_on_hand: Money,

    /// VISA total, POS section.
    pub pos_visa: Money,
    /// MASTERCARD total, POS section.
    pub pos_mastercard: Money,
    /// AMEX total, POS section.
    pub pos_amex: Money,
    /// COMMERCIAL total, POS section.
    pub pos_commercial: Money,
    /// UP CREDIT total, POS section.
    pub pos_up_credit: Money,
    /// DISCOVER total, POS section.
    pub pos_discover: Money,
    /// INTERAC debit total, POS section.
    pub pos_debit: Money,
    /// INTERAC transaction count, POS section.
    pub pos_debit_transaction_count: i64,

    /// VISA total at the outdoor fuel dispensers.
    pub afd_visa: Money,
    /// MASTERCARD total at the dispensers.
    pub afd_mastercard: Money,
    /// AMEX total at the dispensers.
    pub afd_amex: Money,
    /// COMMERCIAL total at the dispensers.
    pub afd_commercial: Money,
    /// UP CREDIT total at the dispensers.
    pub afd_up_credit: Money,
    /// DISCOVER total at the dispensers.
    pub afd_discover: Money,
    /// INTERAC debit total at the dispensers.
    pub afd_debit: Money,
    /// INTERAC transaction count at the dispensers.
    pub afd_debit_transaction_count: i64,

    /// Grand totals of 25-pack cigarette departments.
    pub tobacco_25: Money,
    /// Grand totals of 20-pack cigarette departments.
    pub tobacco_20: Money,
    /// Grand totals of lottery departments.
    pub lottery_total: Money,
    /// Grand totals of prepay (phone card) departments.
    pub prepay_total: Money,

    /// Discount granted inside the JOURNIE Rewards block.
    pub journey_discount: Money,
    /// Discount granted inside the Aeroplan block.
    pub aeroplan_discount: Money,
}

impl SalesRecord {
    /// Element-wise adds every field of `other` into `self`, counts included.
    pub fn accumulate(&mut self, other: &Self) {
        self.total_sales += other.total_sales;
        self.fuel_sales += other.fuel_sales;
        self.item_sales += other.item_sales;
        self.gst += other.gst;
        self.penny_rounding += other.penny_rounding;
        self.total_pos += other.total_pos;
        self.canadian_cash += other.canadian_cash;
        self.fuel_tax_gst += other.fuel_tax_gst;
        self.payouts += other.payouts;
        self.loyalty_discounts += other.loyalty_discounts;
        self.safedrops_count += other.safedrops_count;
        self.safedrops_amount += other.safedrops_amount;
        self.cash_on_hand += other.cash_on_hand;
        self.pos_visa += other.pos_visa;
        self.pos_mastercard += other.pos_mastercard;
        self.pos_amex += other.pos_amex;
        self.pos_commercial += other.pos_commercial;
        self.pos_up_credit += other.pos_up_credit;
        self.pos_discover += other.pos_discover;
        self.pos_debit += other.pos_debit;
        self.pos_debit_transaction_count += other.pos_debit_transaction_count;
        self.afd_visa += other.afd_visa;
        self.afd_mastercard += other.afd_mastercard;
        self.afd_amex += other.afd_amex;
        self.afd_commercial += other.afd_commercial;
        self.afd_up_credit += other.afd_up_credit;
        self.afd_discover += other.afd_discover;
        self.afd_debit += other.afd_debit;
        self.afd_debit_transaction_count += other.afd_debit_transaction_count;
        self.tobacco_25 += other.tobacco_25;
        self.tobacco_20 += other.tobacco_20;
        self.lottery_total += other.lottery_total;
        self.prepay_total += other.prepay_total;
        self.journey_discount += other.journey_discount;
        self.aeroplan_discount += other.aeroplan_discount;
    }

    /// True when the three primary totals are all exactly zero.
    #[must_use]
    pub fn has_no_sales(&self) -> bool {
        self.total_sales.is_zero() && self.fuel_sales.is_zero() && self.item_sales.is_zero()
    }
}

/// Per-file snapshot kept in the aggregate's audit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Original name of the shift file.
    pub file: String,
    /// The figures parsed out of it.
    pub record: SalesRecord,
}

/// Sum of all successfully parsed shift files for one business date.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedReport {
    /// Business date the report covers.
    pub date: NaiveDate,
    /// Element-wise sums over every successful file.
    pub totals: SalesRecord,
    /// Number of files parsed successfully.
    pub files_processed: u32,
    /// Number of files that failed to parse.
    pub files_with_errors: u32,
    /// Per-file snapshots, in input order, for human review.
    pub processed_files: Vec<FileSummary>,
    /// Per-file failures, in input order.
    pub errors: Vec<FileError>,
}
