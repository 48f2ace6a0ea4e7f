use crate::{error::ExpenseDraftError, ports::MemberDirectory};
use fxhash::FxHashSet;
use groupsplit_domain::{MemberId, Money, Transaction, TransactionId, Transfer};

/// A new expense as submitted by a member, before it is checked against the
/// group roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub payer: MemberId,
    pub description: String,
    pub amount: Money,
    /// Requested beneficiaries; empty means the whole group.
    pub pay_for: Vec<MemberId>,
}

/// A transaction ready to be persisted, with its description.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub description: String,
    pub transaction: Transaction,
}

impl ExpenseDraft {
    /// Validates the draft and splits the amount evenly over its
    /// beneficiaries.
    ///
    /// Requested beneficiaries outside `roster` are dropped; if none remain
    /// the whole roster pays. Duplicates count once.
    pub fn normalize(
        self,
        id: TransactionId,
        roster: &[MemberId],
    ) -> Result<ExpenseRecord, ExpenseDraftError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ExpenseDraftError::MissingDescription);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseDraftError::NonPositiveAmount);
        }
        if !roster.contains(&self.payer) {
            return Err(ExpenseDraftError::PayerNotMember(self.payer.0));
        }

        let roster_lookup: FxHashSet<MemberId> = roster.iter().copied().collect();
        let mut seen = FxHashSet::default();
        let mut beneficiaries: Vec<MemberId> = self
            .pay_for
            .iter()
            .copied()
            .filter(|id| roster_lookup.contains(id) && seen.insert(*id))
            .collect();

        if beneficiaries.len() < self.pay_for.len() {
            tracing::debug!(
                requested = self.pay_for.len(),
                kept = beneficiaries.len(),
                "Dropped beneficiaries outside the group roster"
            );
        }
        if beneficiaries.is_empty() {
            beneficiaries = roster.to_vec();
        }

        let part = self
            .amount
            .split_evenly(beneficiaries.len())
            .ok_or(ExpenseDraftError::NoBeneficiaries)?;

        let transaction = beneficiaries.into_iter().fold(
            Transaction::new(id, self.payer, self.amount),
            |transaction, beneficiary| transaction.with_share(beneficiary, part),
        );

        Ok(ExpenseRecord {
            description: description.to_string(),
            transaction,
        })
    }
}

/// The transaction that marks a suggested transfer as paid: the debtor pays
/// and the creditor is the sole beneficiary.
#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentDraft {
    pub description: String,
    pub payer: MemberId,
    pub beneficiary: MemberId,
    pub amount: Money,
}

impl RepaymentDraft {
    pub fn from_transfer(transfer: &Transfer, directory: &dyn MemberDirectory) -> Self {
        let from = member_label(transfer.from, directory);
        let to = member_label(transfer.to, directory);

        Self {
            description: format!("Settlement: {from} -> {to}"),
            payer: transfer.from,
            beneficiary: transfer.to,
            amount: transfer.amount,
        }
    }

    pub fn into_record(self, id: TransactionId) -> ExpenseRecord {
        ExpenseRecord {
            transaction: Transaction::new(id, self.payer, self.amount)
                .with_share(self.beneficiary, self.amount),
            description: self.description,
        }
    }
}

fn member_label(member_id: MemberId, directory: &dyn MemberDirectory) -> String {
    match directory.display_name(member_id) {
        Some(name) => name.to_string(),
        None => member_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    #[fixture]
    fn roster() -> Vec<MemberId> {
        vec![MemberId(1), MemberId(2), MemberId(3)]
    }

    fn draft(amount: i64, pay_for: &[u64]) -> ExpenseDraft {
        ExpenseDraft {
            payer: MemberId(1),
            description: "  Dinner ".to_string(),
            amount: Money::from_i64(amount),
            pay_for: pay_for.iter().copied().map(MemberId).collect(),
        }
    }

    fn beneficiaries(record: &ExpenseRecord) -> Vec<u64> {
        record
            .transaction
            .shares
            .iter()
            .map(|share| share.beneficiary.0)
            .collect()
    }

    #[rstest]
    #[case::explicit(&[2, 3], &[2, 3], 15)]
    #[case::empty_means_everyone(&[], &[1, 2, 3], 10)]
    #[case::outsiders_dropped(&[2, 9], &[2], 30)]
    #[case::only_outsiders_falls_back(&[8, 9], &[1, 2, 3], 10)]
    #[case::duplicates_once(&[2, 2, 3], &[2, 3], 15)]
    fn normalize_beneficiaries(
        roster: Vec<MemberId>,
        #[case] pay_for: &[u64],
        #[case] expected: &[u64],
        #[case] part: i64,
    ) {
        let record = draft(30, pay_for)
            .normalize(TransactionId(5), &roster)
            .expect("valid draft");

        assert_eq!(record.description, "Dinner");
        assert_eq!(record.transaction.id, TransactionId(5));
        assert_eq!(beneficiaries(&record), expected);
        assert!(
            record
                .transaction
                .shares
                .iter()
                .all(|share| share.amount == Money::from_i64(part))
        );
    }

    #[rstest]
    #[case::blank_description(
        ExpenseDraft { description: "   ".to_string(), ..draft(30, &[]) },
        ExpenseDraftError::MissingDescription,
    )]
    #[case::zero_amount(draft(0, &[]), ExpenseDraftError::NonPositiveAmount)]
    #[case::negative_amount(draft(-5, &[]), ExpenseDraftError::NonPositiveAmount)]
    #[case::outsider_payer(
        ExpenseDraft { payer: MemberId(9), ..draft(30, &[]) },
        ExpenseDraftError::PayerNotMember(9),
    )]
    fn normalize_rejects(
        roster: Vec<MemberId>,
        #[case] input: ExpenseDraft,
        #[case] expected: ExpenseDraftError,
    ) {
        assert_eq!(input.normalize(TransactionId(1), &roster), Err(expected));
    }

    #[rstest]
    fn repayment_pays_the_creditor() {
        let mut directory = HashMap::new();
        directory.insert(MemberId(1), "Alice".to_string());
        directory.insert(MemberId(2), "Bob".to_string());
        let transfer = Transfer {
            from: MemberId(2),
            to: MemberId(1),
            amount: Money::from_i64(10),
        };

        let record = RepaymentDraft::from_transfer(&transfer, &directory).into_record(TransactionId(7));

        assert_eq!(record.description, "Settlement: Bob -> Alice");
        assert_eq!(record.transaction.payer, MemberId(2));
        assert_eq!(beneficiaries(&record), vec![1]);
        assert_eq!(record.transaction.amount, Money::from_i64(10));
        assert_eq!(record.transaction.share_total(), Money::from_i64(10));
    }

    #[rstest]
    fn repayment_falls_back_to_ids() {
        let directory: HashMap<MemberId, String> = HashMap::new();
        let transfer = Transfer {
            from: MemberId(4),
            to: MemberId(6),
            amount: Money::from_i64(1),
        };

        let draft = RepaymentDraft::from_transfer(&transfer, &directory);

        assert_eq!(draft.description, "Settlement: #4 -> #6");
    }
}
