use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way money moved on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Money out (debit).
    Outbound,
    /// Money in (credit).
    Inbound,
}

impl Direction {
    pub fn category(self) -> Category {
        match self {
            Direction::Outbound => Category::Expense,
            Direction::Inbound => Category::Income,
        }
    }
}

/// Fixed category labels attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Expense,
    Income,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Expense => "Expense",
            Category::Income => "Income",
        }
    }

    /// Parse the exact label (case-sensitive).
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Expense" => Some(Category::Expense),
            "Income" => Some(Category::Income),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Normalized output of statement parsers.
///
/// Everything is kept as text: the date is the statement's own
/// "Mon D, YYYY" token and the amount is a signed decimal string
/// (`-15500.00` for money out, `20000.00` for money in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: Category,
}

impl TransactionRecord {
    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_label() {
        let rec = TransactionRecord {
            date: "Jan 5, 2024".to_string(),
            description: "Grocery Store".to_string(),
            amount: "-15500.00".to_string(),
            category: Category::Expense,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["category"], "Expense");
        assert_eq!(json["amount"], "-15500.00");
    }

    #[test]
    fn test_direction_maps_to_category() {
        assert_eq!(Direction::Outbound.category(), Category::Expense);
        assert_eq!(Direction::Inbound.category(), Category::Income);
        assert_eq!(Category::from_label("Income"), Some(Category::Income));
        assert_eq!(Category::from_label("income"), None);
    }
}
