use groupsplit_domain::{
    Member, MemberBalance, MemberId, Money, Transaction, TransactionId, Transfer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
    pub created_by: MemberId,
    pub invite_code: String,
}

/// One group's snapshot as handed over by storage.
#[derive(Clone, Debug)]
pub struct GroupLedger {
    pub group: GroupInfo,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
}

impl GroupLedger {
    pub fn roster(&self) -> Vec<MemberId> {
        self.members.iter().map(|member| member.id).collect()
    }

    pub fn next_transaction_id(&self) -> TransactionId {
        let next = self
            .transactions
            .iter()
            .map(|transaction| transaction.id.0)
            .max()
            .map_or(1, |max| max + 1);
        TransactionId(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonBalance {
    pub id: MemberId,
    pub paid: Money,
    pub owed: Money,
    pub net: Money,
}

impl PersonBalance {
    pub fn new(id: MemberId, balance: MemberBalance) -> Self {
        Self {
            id,
            paid: balance.paid,
            owed: balance.owed,
            net: balance.net(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerView {
    pub group: GroupInfo,
    /// Group members, in roster order.
    pub balances: Vec<PersonBalance>,
    /// Ids referenced by transactions but missing from the roster.
    pub unmatched: Vec<PersonBalance>,
    pub transfers: Vec<Transfer>,
    pub group_total: Money,
}

impl LedgerView {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
