use crate::{
    error::{ExpenseDraftError, LedgerError},
    expense::{ExpenseDraft, ExpenseRecord, RepaymentDraft},
    model::{GroupId, GroupLedger, LedgerView, PersonBalance},
    ports::LedgerSource,
};
use fxhash::FxHashSet;
use groupsplit_domain::{MemberId, Money, SettlementEngine, TransactionId};

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    source: &'a dyn LedgerSource,
    engine: SettlementEngine,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(source: &'a dyn LedgerSource, engine: SettlementEngine) -> Self {
        Self { source, engine }
    }

    /// Picks the requested group, or the only group when none is requested.
    pub fn resolve_group(&self, requested: Option<GroupId>) -> Result<GroupId, LedgerError> {
        if let Some(group) = requested {
            return Ok(group);
        }

        let groups = self.source.groups()?;
        match groups.as_slice() {
            [] => Err(LedgerError::NoGroups),
            [only] => Ok(only.id),
            many => Err(LedgerError::AmbiguousGroup(many.len())),
        }
    }

    pub fn load_ledger(&self, requested: Option<GroupId>) -> Result<GroupLedger, LedgerError> {
        let group = self.resolve_group(requested)?;
        let ledger = self.source.load(group)?;
        tracing::debug!(
            group_id = group.0,
            member_count = ledger.members.len(),
            transaction_count = ledger.transactions.len(),
            "Loaded group ledger"
        );
        Ok(ledger)
    }

    pub fn load_view(&self, requested: Option<GroupId>) -> Result<LedgerView, LedgerError> {
        let ledger = self.load_ledger(requested)?;
        Ok(self.build_view(&ledger))
    }

    pub fn build_view(&self, ledger: &GroupLedger) -> LedgerView {
        let settlement = self
            .engine
            .compute(&ledger.members, &ledger.transactions);

        let unmatched_lookup: FxHashSet<MemberId> = settlement.unmatched.iter().copied().collect();
        let (unmatched, balances): (Vec<PersonBalance>, Vec<PersonBalance>) = settlement
            .balances
            .iter()
            .map(|(id, balance)| PersonBalance::new(*id, *balance))
            .partition(|person| unmatched_lookup.contains(&person.id));

        let group_total: Money = ledger
            .transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum();

        LedgerView {
            group: ledger.group.clone(),
            balances,
            unmatched,
            transfers: settlement.transfers,
            group_total,
        }
    }

    /// One repayment per suggested transfer, numbered after the ledger's
    /// existing transactions.
    pub fn repayments(&self, ledger: &GroupLedger, view: &LedgerView) -> Vec<ExpenseRecord> {
        let first = ledger.next_transaction_id().0;
        view.transfers
            .iter()
            .zip(first..)
            .map(|(transfer, id)| {
                RepaymentDraft::from_transfer(transfer, ledger)
                    .into_record(TransactionId(id))
            })
            .collect()
    }

    pub fn draft_expense(
        &self,
        ledger: &GroupLedger,
        draft: ExpenseDraft,
    ) -> Result<ExpenseRecord, ExpenseDraftError> {
        draft.normalize(ledger.next_transaction_id(), &ledger.roster())
    }
}
