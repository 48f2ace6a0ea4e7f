use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerSourceError {
    #[error("failed to read ledger '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ledger: {0}")]
    Malformed(String),
    #[error("group {0} not found")]
    GroupNotFound(u64),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Source(#[from] LedgerSourceError),
    #[error("ledger contains no groups")]
    NoGroups,
    #[error("ledger contains {0} groups; choose one with --group")]
    AmbiguousGroup(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseDraftError {
    #[error("description is required")]
    MissingDescription,
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("payer {0} is not a member of this group")]
    PayerNotMember(u64),
    #[error("no beneficiaries found for this transaction")]
    NoBeneficiaries,
}
