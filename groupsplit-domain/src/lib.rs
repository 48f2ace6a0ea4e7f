#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Member, MemberBalance, MemberBalances, MemberId, Money, Settlement, Share, Tolerance,
    Transaction, TransactionId, Transfer,
};
pub use services::{BalanceAccumulator, SettlementCalculator, SettlementEngine};
