//! tally-ingest: turn extracted statement text into transaction records.

pub mod normalize;
pub mod parsers;
pub mod patterns;
pub mod sink;
pub mod text;
pub mod types;

pub use parsers::{RevolutParser, parse_revolut_statement};
pub use sink::{IngestSummary, MemorySink, RecordSink, ingest_statement};
pub use text::{ExtractError, PlainTextPages, TextSource, join_pages};
pub use types::{Category, Direction, TransactionRecord};
