//! Line-shape rules for transaction rows in extracted statement text.
//!
//! A transaction row looks like:
//!   Jan 5, 2024    Grocery Store    15,500.00 HUF
//!
//! Each rule is anchored at the start of a line and only ever sees one line,
//! so a row that extraction wrapped onto two lines matches nothing.

use anyhow::{Context, Result};
use regex::Regex;

use crate::types::Direction;

/// The only currency the rules recognise. Another currency needs its own
/// pair of rules.
pub const CURRENCY_SUFFIX: &str = "HUF";

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

/// Non-greedy, so the description stops at the first amount + currency
/// suffix that completes the row.
const ANY_DESCRIPTION: &str = ".+?";

/// Money in is rarer and noisier, so only these descriptions count.
const INBOUND_DESCRIPTION: &str = "Apple Pay Top-Up.*?|Transfer from.*?|Goodwill";

/// Raw substrings pulled out of one matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCapture<'t> {
    /// 1-based line number within the statement text.
    pub line_no: usize,
    pub line: &'t str,
    pub date: &'t str,
    pub description: &'t str,
    pub amount: &'t str,
}

/// One compiled transaction shape.
#[derive(Debug, Clone)]
pub struct PatternRule {
    direction: Direction,
    re: Regex,
}

impl PatternRule {
    /// Generic "money out" rule: any description.
    pub fn outbound() -> Result<Self> {
        Self::build(Direction::Outbound, ANY_DESCRIPTION)
    }

    /// "Money in" rule: top-ups, incoming transfers and goodwill credits.
    pub fn inbound() -> Result<Self> {
        Self::build(Direction::Inbound, INBOUND_DESCRIPTION)
    }

    // Digits are spelled `[0-9]`: `\d` would also accept non-ASCII digits.
    fn build(direction: Direction, description: &str) -> Result<Self> {
        let currency = regex::escape(CURRENCY_SUFFIX);
        let pattern = [
            format!(r"^(?P<date>(?:{MONTHS})\s(?:3[01]|[12][0-9]|0?[1-9]),\s[0-9]{{4}})\s+"),
            format!(r"(?P<desc>{description})\s+"),
            format!(r"(?P<amount>[0-9][0-9,]*\.[0-9]{{2}})\s{currency}\b"),
        ]
        .concat();

        let re = Regex::new(&pattern)
            .with_context(|| format!("compiling {direction:?} transaction pattern"))?;
        Ok(Self { direction, re })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether this rule claims `line`; the outbound pass skips inbound rows.
    pub(crate) fn is_match(&self, line: &str) -> bool {
        self.re.is_match(line)
    }

    /// Decompose a single line. `None` for anything short of the full shape.
    pub fn capture_line<'t>(&self, line_no: usize, line: &'t str) -> Option<RawCapture<'t>> {
        let caps = self.re.captures(line)?;

        let (Some(date), Some(description), Some(amount)) =
            (caps.name("date"), caps.name("desc"), caps.name("amount"))
        else {
            tracing::trace!(line_no, line, "partial capture discarded");
            return None;
        };

        Some(RawCapture {
            line_no,
            line,
            date: date.as_str(),
            description: description.as_str(),
            amount: amount.as_str(),
        })
    }

    /// Every matching line of `text`, in source order.
    pub fn scan<'t>(&self, text: &'t str) -> impl Iterator<Item = RawCapture<'t>> {
        text.lines()
            .enumerate()
            .filter_map(move |(i, line)| self.capture_line(i + 1, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_splits_basic_row() {
        let rule = PatternRule::outbound().unwrap();
        assert_eq!(rule.direction(), Direction::Outbound);
        let cap = rule
            .capture_line(1, "Jan 5, 2024    Grocery Store    15,500.00 HUF")
            .unwrap();
        assert_eq!(cap.date, "Jan 5, 2024");
        assert_eq!(cap.description.trim(), "Grocery Store");
        assert_eq!(cap.amount, "15,500.00");
    }

    #[test]
    fn test_non_greedy_description_keeps_numbers() {
        let rule = PatternRule::outbound().unwrap();
        let cap = rule
            .capture_line(1, "Jan 5, 2024  Coffee Shop 100.00  99.50 HUF")
            .unwrap();
        assert_eq!(cap.description, "Coffee Shop 100.00");
        assert_eq!(cap.amount, "99.50");
    }

    #[test]
    fn test_first_amount_with_suffix_ends_description() {
        // Trailing balance column after the amount.
        let rule = PatternRule::outbound().unwrap();
        let cap = rule
            .capture_line(1, "Mar 12, 2024 Lidl 4,210.00 HUF 95,790.00 HUF")
            .unwrap();
        assert_eq!(cap.description, "Lidl");
        assert_eq!(cap.amount, "4,210.00");
    }

    #[test]
    fn test_inbound_accepts_known_descriptions_only() {
        let rule = PatternRule::inbound().unwrap();
        assert_eq!(rule.direction(), Direction::Inbound);

        let top_up = rule
            .capture_line(1, "Jan 6, 2024    Apple Pay Top-Up by *1234    20,000.00 HUF")
            .unwrap();
        assert_eq!(top_up.description, "Apple Pay Top-Up by *1234");

        let transfer = rule
            .capture_line(2, "Feb 1, 2024 Transfer from JOHN SMITH 150,000.00 HUF")
            .unwrap();
        assert_eq!(transfer.description, "Transfer from JOHN SMITH");

        let goodwill = rule.capture_line(3, "Feb 2, 2024 Goodwill 500.00 HUF").unwrap();
        assert_eq!(goodwill.description, "Goodwill");

        assert!(rule.capture_line(4, "Feb 3, 2024 Random Refund 500.00 HUF").is_none());
        // "Goodwill" is exact, not a prefix.
        assert!(rule.capture_line(5, "Feb 3, 2024 Goodwill Store 500.00 HUF").is_none());
    }

    #[test]
    fn test_rejects_partial_shapes() {
        let rule = PatternRule::outbound().unwrap();
        for line in [
            "jan 5, 2024 Grocery 100.00 HUF",
            "Jan 5 2024 Grocery 100.00 HUF",
            "Jan 5, 24 Grocery 100.00 HUF",
            "Jan 32, 2024 Grocery 100.00 HUF",
            "Jan 5, 2024 Grocery 100.0 HUF",
            "Jan 5, 2024 Grocery 100.00 EUR",
            "Jan 5, 2024 Grocery 100.00 HUFX",
            "Jan 5, 2024 Grocery ,.00 HUF",
            "  Jan 5, 2024 Grocery 100.00 HUF",
            "Jan 5, 2024 100.00 HUF",
        ] {
            assert!(rule.capture_line(1, line).is_none(), "matched: {line}");
        }
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        let rule = PatternRule::outbound().unwrap();
        for line in [
            "Jan 5, 2024 Shop \u{661}\u{662}.\u{663}\u{664} HUF",
            "Jan 5, 2024 Shop 1\u{662}.34 HUF",
            "Jan 5, 2024 Shop 12.3\u{664} HUF",
            "Jan \u{661}\u{662}, 2024 Shop 12.34 HUF",
            "Jan 5, \u{662}\u{660}\u{662}\u{664} Shop 12.34 HUF",
        ] {
            assert!(rule.capture_line(1, line).is_none(), "matched: {line}");
        }
        let txns =
            crate::parse_revolut_statement("Jan 5, 2024 Shop \u{661}\u{662}.\u{663}\u{664} HUF\n")
                .unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_day_accepts_leading_zero_and_invalid_calendar_dates() {
        let rule = PatternRule::outbound().unwrap();
        assert_eq!(
            rule.capture_line(1, "Feb 30, 2024 Bakery 1.50 HUF").unwrap().date,
            "Feb 30, 2024"
        );
        assert_eq!(
            rule.capture_line(1, "Feb 05, 2024 Bakery 1.50 HUF").unwrap().date,
            "Feb 05, 2024"
        );
    }

    #[test]
    fn test_scan_reports_line_numbers() {
        let rule = PatternRule::outbound().unwrap();
        let text = "Statement\nJan 5, 2024 A 1.00 HUF\n\nJan 7, 2024 B 2.00 HUF\n";
        let caps: Vec<_> = rule.scan(text).collect();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].line_no, 2);
        assert_eq!(caps[1].line_no, 4);
        assert_eq!(caps[1].line, "Jan 7, 2024 B 2.00 HUF");
    }
}
