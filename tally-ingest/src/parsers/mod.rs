pub mod revolut_huf;

pub use revolut_huf::{RevolutParser, parse_revolut_statement};
