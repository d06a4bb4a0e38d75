//! Output module
//! Renders extraction results and maintains the candidate ledger

pub mod formatter;
pub mod ledger;
pub mod record;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter, ResultRenderer};
pub use ledger::Ledger;
pub use record::{CandidateRecord, ExtractionResult, FIELDS_ORDER};
