//! Revolut HUF account statement parser (text)
//!
//! Expected extracted-text rows:
//!   Jan 5, 2024    Grocery Store       15,500.00 HUF
//!   Jan 6, 2024    Apple Pay Top-Up    20,000.00 HUF
//!
//! Two passes run over the whole text: a generic "money out" pass and a
//! narrow "money in" pass. Output is every outbound record followed by every
//! inbound record, each group in source order.

use anyhow::Result;

use crate::normalize::normalize;
use crate::patterns::PatternRule;
use crate::types::{Direction, TransactionRecord};

/// Compiled rules for one statement layout. Immutable, so one instance can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct RevolutParser {
    outbound: PatternRule,
    inbound: PatternRule,
}

impl RevolutParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            outbound: PatternRule::outbound()?,
            inbound: PatternRule::inbound()?,
        })
    }

    /// Parse statement text into records. Never fails; text without any
    /// transaction rows yields an empty vector.
    pub fn parse(&self, text: &str) -> Vec<TransactionRecord> {
        // The generic outbound shape also fits every inbound row; those rows
        // belong to the inbound pass only.
        let outbound = self
            .outbound
            .scan(text)
            .filter(|cap| !self.inbound.is_match(cap.line))
            .map(|cap| normalize(&cap, Direction::Outbound));

        let inbound = self
            .inbound
            .scan(text)
            .map(|cap| normalize(&cap, Direction::Inbound));

        let records: Vec<TransactionRecord> = outbound.chain(inbound).collect();

        for rec in &records {
            tracing::debug!(
                date = %rec.date,
                description = %rec.description,
                amount = %rec.amount,
                category = %rec.category,
                "parsed transaction"
            );
        }
        tracing::debug!(
            total = records.len(),
            expenses = records.iter().filter(|r| r.is_expense()).count(),
            "parsed statement"
        );

        records
    }
}

/// One-shot helper: compile the rules and parse `text`.
pub fn parse_revolut_statement(text: &str) -> Result<Vec<TransactionRecord>> {
    Ok(RevolutParser::new()?.parse(text))
}
