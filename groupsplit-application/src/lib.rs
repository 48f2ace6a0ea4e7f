#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod expense;
pub mod ledger_processor;
pub mod model;
pub mod ports;

pub use error::{ExpenseDraftError, LedgerError, LedgerSourceError};
pub use expense::{ExpenseDraft, ExpenseRecord, RepaymentDraft};
pub use ledger_processor::LedgerProcessor;
pub use model::{GroupId, GroupInfo, GroupLedger, LedgerView, PersonBalance};
pub use ports::{LedgerSource, MemberDirectory};
