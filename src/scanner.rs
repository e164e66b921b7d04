//! Line scanner state: which report block the current line belongs to.
//!
//! SFT reports interleave identically shaped value lines under different
//! headers, so every card or department line only makes sense relative to the
//! most recent header. The scanner tracks that context as three small fields
//! threaded through one file's scan; nothing here touches the sales record.

use std::sync::LazyLock;

use regex::Regex;

/// Active card-totals block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// No card section is open.
    #[default]
    None,
    /// Indoor `POS TOTALS` block.
    PosTotals,
    /// Indoor `DEBIT TOTALS` block.
    DebitTotals,
    /// Outdoor `AFD CREDIT POS TOTALS` block.
    AfdCreditTotals,
    /// Outdoor `AFD DEBIT POS TOTALS` block.
    AfdDebitTotals,
}

/// Active loyalty-program block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoyaltySection {
    /// Outside any loyalty block.
    #[default]
    None,
    /// Inside a `JOURNIE Rewards` block.
    Journey,
    /// Inside an `Aeroplan` block.
    Aeroplan,
}

/// Mutable scan context, scoped to one file's parse.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    /// Card-totals block the scanner is currently inside.
    pub section: Section,
    /// Name of the most recently seen inventory department.
    pub department: Option<String>,
    /// Loyalty block the scanner is currently inside.
    pub loyalty: LoyaltySection,
}

static DEPARTMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Department:\s*\d+\s+(.+)$").expect("valid department regex"));

impl ScanState {
    /// Applies a line's header effect, if any, returning whether the line was
    /// consumed as a header. Header detection runs before value extraction,
    /// so a consumed line never reaches the rule table.
    pub fn observe(&mut self, line: &str) -> bool {
        match line {
            "POS TOTALS" => {
                self.section = Section::PosTotals;
                return true;
            }
            "DEBIT TOTALS" => {
                self.section = Section::DebitTotals;
                return true;
            }
            "AFD CREDIT POS TOTALS" => {
                self.section = Section::AfdCreditTotals;
                return true;
            }
            "AFD DEBIT POS TOTALS" => {
                self.section = Section::AfdDebitTotals;
                return true;
            }
            "Aeroplan" => {
                self.loyalty = LoyaltySection::Aeroplan;
                return true;
            }
            "JOURNIE Rewards" => {
                self.loyalty = LoyaltySection::Journey;
                return true;
            }
            _ => {}
        }
        if line.starts_with("Points earned") {
            self.loyalty = LoyaltySection::None;
            return true;
        }
        if let Some(caps) = DEPARTMENT_RE.captures(line) {
            self.department = Some(caps[1].trim().to_string());
            return true;
        }
        // Any other long all-caps banner ends whatever card section was open.
        if is_caps_banner(line) {
            self.section = Section::None;
            return true;
        }
        false
    }
}

/// A standalone uppercase banner line, e.g. `STORE SUMMARY`.
///
/// Letters and spaces only: card lines such as `VISA 10 500.00 10 500.00`
/// contain digits and must stay visible to the rule table.
fn is_caps_banner(line: &str) -> bool {
    line.len() > 10
        && line.chars().any(|ch| ch.is_ascii_uppercase())
        && line.chars().all(|ch| ch.is_ascii_uppercase() || ch == ' ')
}
