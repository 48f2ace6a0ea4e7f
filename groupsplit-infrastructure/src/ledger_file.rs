use groupsplit_application::{GroupId, GroupInfo, GroupLedger, LedgerSource, LedgerSourceError};
use groupsplit_domain::{Member, MemberId, Money, Tolerance, Transaction, TransactionId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{
    fs,
    path::PathBuf,
};

/// Ledger snapshot stored as JSON, re-read on every load.
///
/// Accepts either a single group document
/// (`{"group": .., "members": [..], "transactions": [..]}`) or
/// `{"groups": [..], "users": [..]}`.
pub struct JsonLedgerFile {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LedgerDocument {
    Many {
        groups: Vec<GroupSnapshotDto>,
        #[serde(default)]
        users: Vec<UserDto>,
    },
    Single(GroupSnapshotDto),
}

#[derive(Deserialize)]
struct GroupSnapshotDto {
    group: GroupDto,
    #[serde(default)]
    members: Vec<UserDto>,
    #[serde(default)]
    transactions: Vec<TransactionDto>,
    #[serde(default)]
    users: Vec<UserDto>,
}

#[derive(Deserialize)]
struct GroupDto {
    id: u64,
    #[serde(default)]
    name: String,
    created_by: u64,
    #[serde(default)]
    invite_code: String,
}

#[derive(Deserialize)]
struct UserDto {
    id: u64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Deserialize)]
struct TransactionDto {
    id: u64,
    #[serde(default)]
    description: String,
    amount: Decimal,
    user_id: u64,
    #[serde(default)]
    shares: Vec<ShareDto>,
}

#[derive(Deserialize)]
struct ShareDto {
    user_id: u64,
    amount: Decimal,
}

impl JsonLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Vec<GroupLedger>, LedgerSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LedgerSourceError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_ledgers(&content)
    }
}

impl LedgerSource for JsonLedgerFile {
    fn groups(&self) -> Result<Vec<GroupInfo>, LedgerSourceError> {
        Ok(self
            .read()?
            .into_iter()
            .map(|ledger| ledger.group)
            .collect())
    }

    fn load(&self, group: GroupId) -> Result<GroupLedger, LedgerSourceError> {
        self.read()?
            .into_iter()
            .find(|ledger| ledger.group.id == group)
            .ok_or(LedgerSourceError::GroupNotFound(group.0))
    }
}

pub fn parse_ledgers(content: &str) -> Result<Vec<GroupLedger>, LedgerSourceError> {
    let document: LedgerDocument = serde_json::from_str(content)
        .map_err(|err| LedgerSourceError::Malformed(err.to_string()))?;

    match document {
        LedgerDocument::Many { groups, users } => groups
            .into_iter()
            .map(|snapshot| into_ledger(snapshot, &users))
            .collect(),
        LedgerDocument::Single(snapshot) => Ok(vec![into_ledger(snapshot, &[])?]),
    }
}

fn into_ledger(
    snapshot: GroupSnapshotDto,
    shared_users: &[UserDto],
) -> Result<GroupLedger, LedgerSourceError> {
    let GroupSnapshotDto {
        group,
        members,
        transactions,
        users,
    } = snapshot;

    let mut members: Vec<Member> = members.iter().map(member_from_user).collect();

    // Legacy groups may lack a membership row for their creator.
    let creator = MemberId(group.created_by);
    if !members.iter().any(|member| member.id == creator) {
        if let Some(user) = users
            .iter()
            .chain(shared_users)
            .find(|user| user.id == group.created_by)
        {
            let name = non_empty(user.nickname.as_deref()).unwrap_or("Owner");
            members.insert(0, Member::new(creator, name));
        }
    }

    ensure_amounts_in_range(group.id, &transactions)?;
    let transactions = transactions.into_iter().map(into_transaction).collect();

    Ok(GroupLedger {
        group: GroupInfo {
            id: GroupId(group.id),
            name: group.name,
            created_by: creator,
            invite_code: group.invite_code,
        },
        members,
        transactions,
    })
}

/// Every running total the engine keeps is bounded by the sum of all
/// amount magnitudes, so that sum must fit in a `Decimal`.
fn ensure_amounts_in_range(
    group_id: u64,
    transactions: &[TransactionDto],
) -> Result<(), LedgerSourceError> {
    transactions
        .iter()
        .flat_map(|transaction| {
            std::iter::once(transaction.amount)
                .chain(transaction.shares.iter().map(|share| share.amount))
        })
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount.abs()))
        .map(|_| ())
        .ok_or_else(|| {
            LedgerSourceError::Malformed(format!(
                "amounts in group {group_id} exceed the representable range"
            ))
        })
}

fn into_transaction(dto: TransactionDto) -> Transaction {
    let transaction = dto.shares.iter().fold(
        Transaction::new(
            TransactionId(dto.id),
            MemberId(dto.user_id),
            Money::new(dto.amount),
        ),
        |transaction, share| {
            transaction.with_share(MemberId(share.user_id), Money::new(share.amount))
        },
    );

    if transaction.has_explicit_shares()
        && !Tolerance::ONE_CENT.is_settled(transaction.amount - transaction.share_total())
    {
        tracing::warn!(
            transaction_id = dto.id,
            description = %dto.description,
            amount = %transaction.amount,
            share_total = %transaction.share_total(),
            "Transaction shares do not add up to its amount"
        );
    }

    transaction
}

fn member_from_user(user: &UserDto) -> Member {
    let name = non_empty(user.nickname.as_deref())
        .or_else(|| non_empty(user.email.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| MemberId(user.id).to_string());
    Member::new(MemberId(user.id), name)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
