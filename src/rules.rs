//! Field extraction rules for SFT value lines.
//!
//! Each upstream line label gets one rule: a function from a trimmed line to
//! an optional [`LineValue`]. The rules live in a fixed-priority table so a
//! line updates at most one field and every rule stays unit-testable against
//! a single canned line. Labels are a versioned interface with the POS
//! export; the literal patterns are deliberate.

use std::sync::LazyLock;

use regex::Regex;

use crate::scanner::{LoyaltySection, ScanState, Section};
use crate::types::{CardBrand, Money, SalesRecord};
use crate::utils::{parse_count, parse_money};

/// A single extracted field update, before section/department routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineValue {
    /// `Fuel sales <amount>`.
    FuelSales(Money),
    /// `Item Sales <amount>`.
    ItemSales(Money),
    /// `Total Sales <amount>`.
    TotalSales(Money),
    /// `GST <amount>`, anchored at line start.
    Gst(Money),
    /// `Penny Rounding <amount>`.
    PennyRounding(Money),
    /// `Total POS <amount>`.
    TotalPos(Money),
    /// `Canadian Cash <amount>`.
    CanadianCash(Money),
    /// `Safedrops <count> <amount>`.
    Safedrops {
        /// Envelope count.
        count: i64,
        /// Total dropped.
        amount: Money,
    },
    /// `Cash On Hand <amount>`.
    CashOnHand(Money),
    /// `Fuel tax - GST $<amount>`.
    FuelTaxGst(Money),
    /// `Payouts <amount>`.
    Payouts(Money),
    /// `Total loyalty discounts <amount>`.
    LoyaltyDiscount(Money),
    /// `<BRAND> <count> <amount> <count> <amount>`, routed by section.
    Card {
        /// Which card brand the line reports.
        brand: CardBrand,
        /// Settled total (the line's second amount).
        amount: Money,
    },
    /// `INTERAC <count> <amount>`, routed by the active debit section.
    Debit {
        /// Transaction count.
        count: i64,
        /// Settled total.
        amount: Money,
    },
    /// `Grand Total <int> <int> $<amount>`, routed by department.
    DepartmentTotal(Money),
}

type Rule = fn(&str) -> Option<LineValue>;

/// Extraction rules in priority order; the first match wins.
const RULES: &[Rule] = &[
    fuel_sales,
    item_sales,
    total_sales,
    gst,
    penny_rounding,
    total_pos,
    canadian_cash,
    safedrops,
    cash_on_hand,
    fuel_tax_gst,
    payouts,
    loyalty_discount,
    card_totals,
    debit_totals,
    department_total,
];

/// Runs the rule table over one trimmed line.
pub(crate) fn extract(line: &str) -> Option<LineValue> {
    RULES.iter().find_map(|rule| rule(line))
}

static FUEL_SALES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Fuel sales\s+(\d+\.\d+)$").expect("valid fuel sales regex"));
static ITEM_SALES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Item Sales\s+(\d+\.\d+)$").expect("valid item sales regex"));
static TOTAL_SALES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Total Sales\s+(\d+\.\d+)$").expect("valid total sales regex"));
static GST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GST\s+(\d+\.\d+)$").expect("valid gst regex"));
static PENNY_ROUNDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Penny Rounding\s+(\d+\.\d+)$").expect("valid penny rounding regex")
});
static TOTAL_POS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Total POS\s+(\d+\.\d+)$").expect("valid total pos regex"));
static CANADIAN_CASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Canadian Cash\s+(\d+\.\d+)$").expect("valid canadian cash regex")
});
static SAFEDROPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Safedrops\s+(\d+)\s+(\d+\.\d+)$").expect("valid safedrops regex")
});
static CASH_ON_HAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Cash On Hand\s+(\d+\.\d+)$").expect("valid cash on hand regex")
});
static FUEL_TAX_GST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Fuel tax - GST\s+\$(\d+\.\d+)$").expect("valid fuel tax regex")
});
static PAYOUTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Payouts\s+(\d+\.\d+)$").expect("valid payouts regex"));
static LOYALTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Total loyalty discounts\s+(\d+\.\d+)$").expect("valid loyalty regex")
});
static CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(VISA|MASTERCARD|AMEX|COMMERCIAL|UP CREDIT|DISCOVER)\s+(\d+)\s+(\d+\.\d+)\s+(\d+)\s+(\d+\.\d+)$",
    )
    .expect("valid card regex")
});
static DEBIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^INTERAC\s+(\d+)\s+(\d+\.\d+)$").expect("valid debit regex"));
static GRAND_TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Grand Total\s+(\d+)\s+(\d+)\s+\$(\d+\.\d+)$").expect("valid grand total regex")
});

fn labeled_amount(line: &str, pattern: &Regex) -> Option<Money> {
    pattern
        .captures(line)
        .and_then(|caps| parse_money(&caps[1]))
}

fn fuel_sales(line: &str) -> Option<LineValue> {
    labeled_amount(line, &FUEL_SALES_RE).map(LineValue::FuelSales)
}

fn item_sales(line: &str) -> Option<LineValue> {
    labeled_amount(line, &ITEM_SALES_RE).map(LineValue::ItemSales)
}

fn total_sales(line: &str) -> Option<LineValue> {
    labeled_amount(line, &TOTAL_SALES_RE).map(LineValue::TotalSales)
}

fn gst(line: &str) -> Option<LineValue> {
    labeled_amount(line, &GST_RE).map(LineValue::Gst)
}

fn penny_rounding(line: &str) -> Option<LineValue> {
    labeled_amount(line, &PENNY_ROUNDING_RE).map(LineValue::PennyRounding)
}

fn total_pos(line: &str) -> Option<LineValue> {
    labeled_amount(line, &TOTAL_POS_RE).map(LineValue::TotalPos)
}

fn canadian_cash(line: &str) -> Option<LineValue> {
    labeled_amount(line, &CANADIAN_CASH_RE).map(LineValue::CanadianCash)
}

fn safedrops(line: &str) -> Option<LineValue> {
    let caps = SAFEDROPS_RE.captures(line)?;
    Some(LineValue::Safedrops {
        count: parse_count(&caps[1])?,
        amount: parse_money(&caps[2])?,
    })
}

fn cash_on_hand(line: &str) -> Option<LineValue> {
    labeled_amount(line, &CASH_ON_HAND_RE).map(LineValue::CashOnHand)
}

fn fuel_tax_gst(line: &str) -> Option<LineValue> {
    labeled_amount(line, &FUEL_TAX_GST_RE).map(LineValue::FuelTaxGst)
}

fn payouts(line: &str) -> Option<LineValue> {
    labeled_amount(line, &PAYOUTS_RE).map(LineValue::Payouts)
}

fn loyalty_discount(line: &str) -> Option<LineValue> {
    labeled_amount(line, &LOYALTY_RE).map(LineValue::LoyaltyDiscount)
}

fn card_totals(line: &str) -> Option<LineValue> {
    let caps = CARD_RE.captures(line)?;
    let brand = match &caps[1] {
        "VISA" => CardBrand::Visa,
        "MASTERCARD" => CardBrand::Mastercard,
        "AMEX" => CardBrand::Amex,
        "COMMERCIAL" => CardBrand::Commercial,
        "UP CREDIT" => CardBrand::UpCredit,
        "DISCOVER" => CardBrand::Discover,
        _ => return None,
    };
    // The first count/amount pair is the pre-settlement figure; the second
    // pair carries the settled total the accountants reconcile against.
    Some(LineValue::Card {
        brand,
        amount: parse_money(&caps[5])?,
    })
}

fn debit_totals(line: &str) -> Option<LineValue> {
    let caps = DEBIT_RE.captures(line)?;
    Some(LineValue::Debit {
        count: parse_count(&caps[1])?,
        amount: parse_money(&caps[2])?,
    })
}

fn department_total(line: &str) -> Option<LineValue> {
    let caps = GRAND_TOTAL_RE.captures(line)?;
    parse_money(&caps[3]).map(LineValue::DepartmentTotal)
}

impl LineValue {
    /// Applies the update to the record, consulting the scanner state to
    /// route section- and department-dependent values.
    pub(crate) fn apply(self, record: &mut SalesRecord, state: &ScanState) {
        match self {
            Self::FuelSales(amount) => record.fuel_sales = amount,
            Self::ItemSales(amount) => record.item_sales = amount,
            Self::TotalSales(amount) => record.total_sales = amount,
            Self::Gst(amount) => record.gst = amount,
            Self::PennyRounding(amount) => record.penny_rounding = amount,
            Self::TotalPos(amount) => record.total_pos = amount,
            Self::CanadianCash(amount) => record.canadian_cash = amount,
            Self::Safedrops { count, amount } => {
                record.safedrops_count = count;
                record.safedrops_amount = amount;
            }
            Self::CashOnHand(amount) => record.cash_on_hand = amount,
            Self::FuelTaxGst(amount) => record.fuel_tax_gst = amount,
            Self::Payouts(amount) => record.payouts = amount,
            Self::LoyaltyDiscount(amount) => {
                record.loyalty_discounts += amount;
                match state.loyalty {
                    // Last occurrence in the block wins.
                    LoyaltySection::Journey => record.journey_discount = amount,
                    LoyaltySection::Aeroplan => record.aeroplan_discount = amount,
                    LoyaltySection::None => {}
                }
            }
            Self::Card { brand, amount } => match state.section {
                Section::PosTotals => {
                    *pos_card_field(record, brand) = amount;
                }
                Section::AfdCreditTotals => {
                    *afd_card_field(record, brand) = amount;
                }
                _ => {}
            },
            Self::Debit { count, amount } => match state.section {
                Section::DebitTotals => {
                    record.pos_debit = amount;
                    record.pos_debit_transaction_count = count;
                }
                Section::AfdDebitTotals => {
                    record.afd_debit = amount;
                    record.afd_debit_transaction_count = count;
                }
                _ => {}
            },
            Self::DepartmentTotal(amount) => {
                if let Some(bucket) = department_bucket(record, state.department.as_deref()) {
                    // A department can emit several grand-total lines.
                    *bucket += amount;
                }
            }
        }
    }
}

fn pos_card_field(record: &mut SalesRecord, brand: CardBrand) -> &mut Money {
    match brand {
        CardBrand::Visa => &mut record.pos_visa,
        CardBrand::Mastercard => &mut record.pos_mastercard,
        CardBrand::Amex => &mut record.pos_amex,
        CardBrand::Commercial => &mut record.pos_commercial,
        CardBrand::UpCredit => &mut record.pos_up_credit,
        CardBrand::Discover => &mut record.pos_discover,
    }
}

fn afd_card_field(record: &mut SalesRecord, brand: CardBrand) -> &mut Money {
    match brand {
        CardBrand::Visa => &mut record.afd_visa,
        CardBrand::Mastercard => &mut record.afd_mastercard,
        CardBrand::Amex => &mut record.afd_amex,
        CardBrand::Commercial => &mut record.afd_commercial,
        CardBrand::UpCredit => &mut record.afd_up_credit,
        CardBrand::Discover => &mut record.afd_discover,
    }
}

/// Picks the bucket a grand-total line belongs to, by case-insensitive
/// substring match on the active department name, in fixed precedence.
fn department_bucket<'a>(
    record: &'a mut SalesRecord,
    department: Option<&str>,
) -> Option<&'a mut Money> {
    let upper = department?.to_uppercase();
    if upper.contains("CIG SINGLE 25") {
        Some(&mut record.tobacco_25)
    } else if upper.contains("CIG SINGLE 20") {
        Some(&mut record.tobacco_20)
    } else if upper.contains("LOTTO") || upper.contains("SCRATCH LOTTERY") {
        Some(&mut record.lottery_total)
    } else if upper.contains("PHONE CARDS") {
        Some(&mut record.prepay_total)
    } else {
        // Unmapped departments are ignored on purpose.
        None
    }
}
