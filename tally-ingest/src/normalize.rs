//! Turn raw captures into canonical records.

use crate::patterns::RawCapture;
use crate::types::{Direction, TransactionRecord};

/// Strip thousands separators: "15,500.00" -> "15500.00".
pub fn clean_amount(raw: &str) -> String {
    raw.replace(',', "")
}

/// Apply the sign convention for `direction` to an already cleaned amount.
pub fn signed_amount(cleaned: &str, direction: Direction) -> String {
    match direction {
        Direction::Outbound => format!("-{cleaned}"),
        Direction::Inbound => cleaned.to_string(),
    }
}

/// Build a record from one capture.
///
/// The date is passed through untouched and the description only loses
/// leading/trailing whitespace.
pub fn normalize(capture: &RawCapture<'_>, direction: Direction) -> TransactionRecord {
    TransactionRecord {
        date: capture.date.to_string(),
        description: capture.description.trim().to_string(),
        amount: signed_amount(&clean_amount(capture.amount), direction),
        category: direction.category(),
    }
}

/// True when `amount` has the canonical shape `-?\d+\.\d{2}`.
pub fn is_canonical_amount(amount: &str) -> bool {
    let unsigned = amount.strip_prefix('-').unwrap_or(amount);
    let Some((whole, frac)) = unsigned.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && frac.len() == 2
        && frac.bytes().all(|b| b.is_ascii_digit())
}
