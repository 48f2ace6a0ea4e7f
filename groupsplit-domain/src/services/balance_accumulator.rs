use crate::model::{Member, MemberBalance, MemberBalances, MemberId, Money, Transaction};

/// Folds transactions into per-member paid/owed totals.
pub struct BalanceAccumulator {
    balances: MemberBalances,
    roster: Vec<MemberId>,
}

impl BalanceAccumulator {
    pub fn new(members: &[Member]) -> Self {
        let roster: Vec<MemberId> = members.iter().map(|member| member.id).collect();
        let balances = roster
            .iter()
            .map(|&id| (id, MemberBalance::default()))
            .collect();

        Self { balances, roster }
    }

    /// Adds one transaction.
    ///
    /// A transaction without shares is split evenly across the roster this
    /// accumulator was built with, i.e. the group's *current* members rather
    /// than the members at the time it was recorded. Adding or removing a
    /// member therefore changes how older share-less transactions are split.
    pub fn apply(&mut self, transaction: &Transaction) {
        self.entry(transaction.payer).paid += transaction.amount;

        if transaction.has_explicit_shares() {
            for share in &transaction.shares {
                self.entry(share.beneficiary).owed += share.amount;
            }
            return;
        }

        let Some(part) = transaction.amount.split_evenly(self.roster.len()) else {
            tracing::debug!(
                transaction_id = transaction.id.0,
                "Share-less transaction left unallocated: group has no members"
            );
            return;
        };
        distribute_owed(&mut self.balances, &self.roster, part);
    }

    pub fn balances(&self) -> &MemberBalances {
        &self.balances
    }

    pub fn into_balances(self) -> MemberBalances {
        self.balances
    }

    fn entry(&mut self, member: MemberId) -> &mut MemberBalance {
        self.balances.entry(member).or_default()
    }
}

fn distribute_owed(balances: &mut MemberBalances, members: &[MemberId], part: Money) {
    for &member in members {
        balances.entry(member).or_default().owed += part;
    }
}
