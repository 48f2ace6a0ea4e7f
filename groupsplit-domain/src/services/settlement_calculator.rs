use crate::model::{MemberId, Money, Tolerance, Transfer};

/// Greedy debtor/creditor matching over net balances.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementCalculator {
    tolerance: Tolerance,
}

struct Outstanding {
    member: MemberId,
    remaining: Money,
}

impl SettlementCalculator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Calculate the transfers that zero the given net balances.
    ///
    /// # Arguments
    /// * `nets` - `(member, paid - owed)` pairs in member order
    ///
    /// # Returns
    /// Transfers in emission order. Debtors and creditors are both walked in
    /// input order; nothing is sorted by magnitude, so the same input always
    /// yields the same list.
    pub fn calculate<I>(&self, nets: I) -> Vec<Transfer>
    where
        I: IntoIterator<Item = (MemberId, Money)>,
    {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        for (member, net) in nets {
            if self.tolerance.is_settled(net) {
                continue;
            }
            let entry = Outstanding {
                member,
                remaining: net.abs(),
            };
            if net.is_positive() {
                creditors.push(entry);
            } else {
                debtors.push(entry);
            }
        }

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let mut debtor_idx = 0;
        let mut creditor_idx = 0;

        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let debtor = &mut debtors[debtor_idx];
            let creditor = &mut creditors[creditor_idx];
            let amount = debtor.remaining.min(creditor.remaining);

            transfers.push(Transfer {
                from: debtor.member,
                to: creditor.member,
                amount,
            });

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if self.tolerance.is_settled(debtor.remaining) {
                debtor_idx += 1;
            }
            if self.tolerance.is_settled(creditor.remaining) {
                creditor_idx += 1;
            }
        }

        let residual: Money = debtors[debtor_idx.min(debtors.len())..]
            .iter()
            .chain(&creditors[creditor_idx.min(creditors.len())..])
            .map(|entry| entry.remaining)
            .sum();
        if !self.tolerance.is_settled(residual) {
            tracing::warn!(
                residual = %residual,
                tolerance = %self.tolerance.amount(),
                transfer_count = transfers.len(),
                "Net balances do not sum to zero; settlement leaves a residual"
            );
        }

        transfers
    }
}
