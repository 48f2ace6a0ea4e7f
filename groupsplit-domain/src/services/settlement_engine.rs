use crate::{
    model::{Member, MemberId, Settlement, Tolerance, Transaction},
    services::{BalanceAccumulator, SettlementCalculator},
};
use fxhash::FxHashSet;

/// Balance aggregation followed by settlement, recomputed from scratch on
/// every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementEngine {
    calculator: SettlementCalculator,
}

impl SettlementEngine {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            calculator: SettlementCalculator::new(tolerance),
        }
    }

    pub fn compute(&self, members: &[Member], transactions: &[Transaction]) -> Settlement {
        let mut accumulator = BalanceAccumulator::new(members);
        for transaction in transactions {
            accumulator.apply(transaction);
        }
        let balances = accumulator.into_balances();

        let roster: FxHashSet<MemberId> = members.iter().map(|member| member.id).collect();
        let unmatched: Vec<MemberId> = balances
            .keys()
            .copied()
            .filter(|id| !roster.contains(id))
            .collect();
        if !unmatched.is_empty() {
            tracing::warn!(
                unmatched = ?unmatched,
                member_count = members.len(),
                "Transactions reference ids outside the member list"
            );
        }

        // Only the roster takes part in settlement; unmatched ids stay visible
        // in `balances`.
        let transfers = self.calculator.calculate(
            members
                .iter()
                .filter_map(|member| balances.get(&member.id).map(|b| (member.id, b.net()))),
        );

        tracing::debug!(
            member_count = members.len(),
            transaction_count = transactions.len(),
            transfer_count = transfers.len(),
            "Settlement computed"
        );

        Settlement {
            balances,
            transfers,
            unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberBalance, Money, TransactionId, Transfer};
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> SettlementEngine {
        SettlementEngine::default()
    }

    fn members(names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Member::new(MemberId(idx as u64 + 1), *name))
            .collect()
    }

    fn balance(paid: i64, owed: i64) -> MemberBalance {
        MemberBalance {
            paid: Money::from_i64(paid),
            owed: Money::from_i64(owed),
        }
    }

    fn transfer(from: u64, to: u64, amount: i64) -> Transfer {
        Transfer {
            from: MemberId(from),
            to: MemberId(to),
            amount: Money::from_i64(amount),
        }
    }

    #[rstest]
    fn two_members_explicit_shares(engine: SettlementEngine) {
        let members = members(&["Alice", "Bob"]);
        let transactions = [Transaction::new(TransactionId(1), MemberId(1), Money::from_i64(20))
            .with_share(MemberId(1), Money::from_i64(10))
            .with_share(MemberId(2), Money::from_i64(10))];

        let settlement = engine.compute(&members, &transactions);

        assert_eq!(settlement.balances[&MemberId(1)], balance(20, 10));
        assert_eq!(settlement.balances[&MemberId(2)], balance(0, 10));
        assert_eq!(settlement.transfers, vec![transfer(2, 1, 10)]);
        assert!(settlement.unmatched.is_empty());
    }

    #[rstest]
    fn share_less_transaction_splits_evenly(engine: SettlementEngine) {
        let members = members(&["A", "B", "C"]);
        let transactions = [Transaction::new(
            TransactionId(1),
            MemberId(1),
            Money::from_i64(30),
        )];

        let settlement = engine.compute(&members, &transactions);

        assert_eq!(settlement.balances[&MemberId(1)], balance(30, 10));
        assert_eq!(settlement.balances[&MemberId(2)], balance(0, 10));
        assert_eq!(settlement.balances[&MemberId(3)], balance(0, 10));
        assert_eq!(
            settlement.transfers,
            vec![transfer(2, 1, 10), transfer(3, 1, 10)]
        );
    }

    #[rstest]
    fn everyone_even_needs_no_transfers(engine: SettlementEngine) {
        let members = members(&["A", "B"]);
        let transactions = [
            Transaction::new(TransactionId(1), MemberId(1), Money::from_i64(10))
                .with_share(MemberId(2), Money::from_i64(10)),
            Transaction::new(TransactionId(2), MemberId(2), Money::from_i64(10))
                .with_share(MemberId(1), Money::from_i64(10)),
        ];

        let settlement = engine.compute(&members, &transactions);

        assert!(settlement.is_settled());
        assert_eq!(settlement.balances[&MemberId(1)], balance(10, 10));
    }

    #[rstest]
    fn no_members_and_no_transactions(engine: SettlementEngine) {
        let settlement = engine.compute(&[], &[]);

        assert!(settlement.balances.is_empty());
        assert!(settlement.transfers.is_empty());
        assert!(settlement.unmatched.is_empty());
    }

    #[rstest]
    fn one_debtor_pays_two_creditors(engine: SettlementEngine) {
        let members = members(&["C1", "C2", "D"]);
        let transactions = [
            Transaction::new(TransactionId(1), MemberId(1), Money::from_i64(5))
                .with_share(MemberId(3), Money::from_i64(5)),
            Transaction::new(TransactionId(2), MemberId(2), Money::from_i64(5))
                .with_share(MemberId(3), Money::from_i64(5)),
        ];

        let settlement = engine.compute(&members, &transactions);

        assert_eq!(
            settlement.transfers,
            vec![transfer(3, 1, 5), transfer(3, 2, 5)]
        );
    }

    #[rstest]
    fn unmatched_ids_are_reported_but_not_settled(engine: SettlementEngine) {
        let members = members(&["A", "B"]);
        let transactions = [Transaction::new(TransactionId(1), MemberId(1), Money::from_i64(20))
            .with_share(MemberId(2), Money::from_i64(10))
            .with_share(MemberId(5), Money::from_i64(10))];

        let settlement = engine.compute(&members, &transactions);

        assert_eq!(settlement.unmatched, vec![MemberId(5)]);
        assert_eq!(settlement.balances[&MemberId(5)], balance(0, 10));
        assert_eq!(settlement.transfers, vec![transfer(2, 1, 10)]);
    }

    #[rstest]
    fn recording_a_repayment_settles_the_pair(engine: SettlementEngine) {
        let members = members(&["Alice", "Bob"]);
        let mut transactions = vec![Transaction::new(
            TransactionId(1),
            MemberId(1),
            Money::from_i64(20),
        )];

        let first = engine.compute(&members, &transactions);
        let [suggested] = first.transfers.as_slice() else {
            panic!("expected a single transfer, got {:?}", first.transfers);
        };
        transactions.push(
            Transaction::new(TransactionId(2), suggested.from, suggested.amount)
                .with_share(suggested.to, suggested.amount),
        );

        let second = engine.compute(&members, &transactions);

        assert!(second.is_settled());
        for entry in second.balances.values() {
            assert!(entry.net().is_zero());
        }
    }
}
