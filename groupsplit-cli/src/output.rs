use groupsplit_application::{ExpenseRecord, LedgerView, MemberDirectory, PersonBalance};
use groupsplit_domain::Transfer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct LedgerViewDto {
    pub group_id: u64,
    pub group_name: String,
    pub balances: Vec<BalanceDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<BalanceDto>,
    pub transfers: Vec<TransferDto>,
    pub group_total: Decimal,
    pub settled: bool,
}

#[derive(Serialize)]
pub struct BalanceDto {
    pub id: u64,
    pub name: Option<String>,
    pub paid: Decimal,
    pub owed: Decimal,
    pub net: Decimal,
}

#[derive(Serialize)]
pub struct TransferDto {
    pub from: u64,
    pub to: u64,
    pub amount: Decimal,
}

/// Same shape as a ledger file transaction, so records can be appended to it.
#[derive(Serialize)]
pub struct TransactionDto {
    pub id: u64,
    pub description: String,
    pub amount: Decimal,
    pub user_id: u64,
    pub shares: Vec<ShareDto>,
}

#[derive(Serialize)]
pub struct ShareDto {
    pub user_id: u64,
    pub amount: Decimal,
}

impl LedgerViewDto {
    pub fn new(view: &LedgerView, directory: &dyn MemberDirectory) -> Self {
        let balance = |person: &PersonBalance| BalanceDto::new(person, directory);
        Self {
            group_id: view.group.id.0,
            group_name: view.group.name.clone(),
            balances: view.balances.iter().map(balance).collect(),
            unmatched: view.unmatched.iter().map(balance).collect(),
            transfers: view.transfers.iter().map(TransferDto::from).collect(),
            group_total: view.group_total.as_decimal(),
            settled: view.is_settled(),
        }
    }
}

impl BalanceDto {
    fn new(person: &PersonBalance, directory: &dyn MemberDirectory) -> Self {
        Self {
            id: person.id.0,
            name: directory.display_name(person.id).map(str::to_string),
            paid: person.paid.as_decimal().normalize(),
            owed: person.owed.as_decimal().normalize(),
            net: person.net.as_decimal().normalize(),
        }
    }
}

impl From<&Transfer> for TransferDto {
    fn from(transfer: &Transfer) -> Self {
        Self {
            from: transfer.from.0,
            to: transfer.to.0,
            amount: transfer.amount.as_decimal().normalize(),
        }
    }
}

impl From<&ExpenseRecord> for TransactionDto {
    fn from(record: &ExpenseRecord) -> Self {
        let transaction = &record.transaction;
        Self {
            id: transaction.id.0,
            description: record.description.clone(),
            amount: transaction.amount.as_decimal().normalize(),
            user_id: transaction.payer.0,
            shares: transaction
                .shares
                .iter()
                .map(|share| ShareDto {
                    user_id: share.beneficiary.0,
                    amount: share.amount.as_decimal().normalize(),
                })
                .collect(),
        }
    }
}
