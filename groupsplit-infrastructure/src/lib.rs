#![warn(clippy::uninlined_format_args)]

pub mod ledger_file;

pub use ledger_file::{JsonLedgerFile, parse_ledgers};
