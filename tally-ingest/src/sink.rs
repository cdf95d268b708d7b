//! Hand-off of parsed records to storage.

use anyhow::Result;
use serde::Serialize;

use crate::parsers::RevolutParser;
use crate::types::TransactionRecord;

/// Storage side of ingestion. Implementations assign identity; the parser
/// never does.
pub trait RecordSink {
    /// Store `records`, returning how many were stored.
    fn store(&mut self, records: &[TransactionRecord]) -> Result<usize>;
}

/// Keeps records in memory. Handy for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<TransactionRecord>,
}

impl RecordSink for MemorySink {
    fn store(&mut self, records: &[TransactionRecord]) -> Result<usize> {
        self.records.extend_from_slice(records);
        Ok(records.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub parsed: usize,
    pub stored: usize,
    pub expenses: usize,
    pub income: usize,
}

/// Parse one statement and pass every record to `sink`.
pub fn ingest_statement(
    parser: &RevolutParser,
    text: &str,
    sink: &mut dyn RecordSink,
) -> Result<IngestSummary> {
    let records = parser.parse(text);
    let expenses = records.iter().filter(|r| r.is_expense()).count();
    let stored = sink.store(&records)?;

    let summary = IngestSummary {
        parsed: records.len(),
        stored,
        expenses,
        income: records.len() - expenses,
    };
    tracing::info!(parsed = summary.parsed, stored = summary.stored, "ingested statement");
    Ok(summary)
}
