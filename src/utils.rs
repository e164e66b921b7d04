//! Numeric parsing helpers shared by the extraction rules.

use std::str::FromStr;

use crate::types::Money;

/// Parses a captured monetary value (`\d+\.\d+`) into an exact decimal.
pub(crate) fn parse_money(value: &str) -> Option<Money> {
    Money::from_str(value).ok()
}

/// Parses a captured transaction or envelope count.
pub(crate) fn parse_count(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Money {
        value.parse().expect("valid decimal literal")
    }

    #[test]
    fn money_is_exact() {
        assert_eq!(parse_money("1234.56"), Some(dec("1234.56")));
        assert_eq!(parse_money("0.005"), Some(dec("0.005")));
        assert_eq!(parse_money("not money"), None);
    }

    #[test]
    fn counts_are_integers() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("3.5"), None);
    }
}
