//! Small text normalisers shared by the extractor.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// First run of digits, allowing `,` between groups of three.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:,\d{3})+|\d+").expect("valid price regex"));

/// Collapses whitespace runs to single spaces and trims; `None` when nothing
/// is left.
pub(crate) fn clean_text(raw: &str) -> Option<String> {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Drops a trailing day-offset marker such as `"+1"` from a rendered time.
///
/// `"07:45+1"` and `"07:45 +1"` both become `"07:45"`.
pub(crate) fn strip_day_offset(raw: &str) -> Option<String> {
    let head = raw.split('+').next().unwrap_or(raw);
    clean_text(head)
}

/// Parses the first number in a rendered price label.
///
/// `"RM 1,234"` yields `1234`. Labels without digits yield `None`.
pub(crate) fn parse_price(raw: &str) -> Option<Decimal> {
    let digits = PRICE_RE.find(raw)?.as_str().replace(',', "");
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(
            clean_text("  Malaysia\n   Airlines ").as_deref(),
            Some("Malaysia Airlines")
        );
        assert_eq!(clean_text(" \n\t "), None);
    }

    #[test]
    fn strip_day_offset_variants() {
        assert_eq!(strip_day_offset("07:45+1").as_deref(), Some("07:45"));
        assert_eq!(strip_day_offset(" 07:45 +2 ").as_deref(), Some("07:45"));
        assert_eq!(strip_day_offset("19:10").as_deref(), Some("19:10"));
        assert_eq!(strip_day_offset("+1"), None);
    }

    #[test]
    fn parse_price_takes_first_number() {
        assert_eq!(parse_price("RM 312"), Some(Decimal::from(312)));
        assert_eq!(parse_price("RM312 total, was 400"), Some(Decimal::from(312)));
    }

    #[test]
    fn parse_price_drops_thousands_separators() {
        assert_eq!(parse_price("RM 1,234"), Some(Decimal::from(1234)));
        assert_eq!(parse_price("RM 12,345,678"), Some(Decimal::from(12_345_678)));
    }

    #[test]
    fn parse_price_without_digits_is_none() {
        assert_eq!(parse_price("Sold out"), None);
        assert_eq!(parse_price(""), None);
    }
}
