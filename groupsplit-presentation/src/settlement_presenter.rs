use crate::text_table::{Alignment, TextTableBuilder};
use groupsplit_application::{LedgerView, MemberDirectory, PersonBalance};
use groupsplit_domain::{MemberId, Money, Transfer};
use groupsplit_i18n as i18n;
use std::borrow::Cow;

/// Display rounding for amounts. Engine values are exact; only rendering
/// rounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub scale: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            scale: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn format(&self, amount: Money) -> String {
        let (negative, magnitude) = self.rounded(amount);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{magnitude}", self.symbol)
    }

    /// Like [`format`](Self::format) but always signed, zero excepted.
    pub fn format_signed(&self, amount: Money) -> String {
        let (negative, magnitude) = self.rounded(amount);
        let sign = match (negative, magnitude.chars().any(|c| c.is_ascii_digit() && c != '0')) {
            (true, _) => "-",
            (false, true) => "+",
            (false, false) => "",
        };
        format!("{sign}{}{magnitude}", self.symbol)
    }

    fn rounded(&self, amount: Money) -> (bool, String) {
        let rounded = amount.round_to_scale(self.scale).as_decimal();
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        (
            negative,
            format!("{:.*}", self.scale as usize, rounded.abs()),
        )
    }
}

pub struct SettlementView {
    pub balance_table: String,
    pub unmatched_table: Option<String>,
    pub transfer_table: Option<String>,
    /// "X should pay $Z to Y." rows, or the all-settled line.
    pub settlement_lines: Vec<String>,
    pub group_total: String,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let mut sections: Vec<String> = vec![
            format!("{}\n{}", i18n::BALANCES_HEADING, self.balance_table),
        ];
        if let Some(unmatched) = &self.unmatched_table {
            sections.push(format!("{}\n{unmatched}", i18n::UNMATCHED_HEADING));
        }

        let mut summary = format!("{}\n", i18n::SETTLEMENTS_HEADING);
        if let Some(table) = &self.transfer_table {
            summary.push_str(table);
        }
        for line in &self.settlement_lines {
            summary.push_str(line);
            summary.push('\n');
        }
        sections.push(summary);
        sections.push(format!("{}: {}\n", i18n::GROUP_TOTAL, self.group_total));

        sections.join("\n")
    }
}

pub struct SettlementPresenter {
    currency: CurrencyFormat,
}

impl SettlementPresenter {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    pub fn render_with_members(
        &self,
        view: &LedgerView,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        let balance_table = self.build_balance_table(&view.balances, member_directory);
        let unmatched_table = (!view.unmatched.is_empty())
            .then(|| self.build_balance_table(&view.unmatched, member_directory));

        let (transfer_table, settlement_lines) = if view.transfers.is_empty() {
            (None, vec![i18n::ALL_SETTLED.to_string()])
        } else {
            (
                Some(self.build_transfer_table(&view.transfers, member_directory)),
                self.settlement_lines(&view.transfers, member_directory),
            )
        };

        SettlementView {
            balance_table,
            unmatched_table,
            transfer_table,
            settlement_lines,
            group_total: self.currency.format(view.group_total),
        }
    }

    pub fn build_balance_table(
        &self,
        person_balances: &[PersonBalance],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let headers = [
            Cow::Borrowed(i18n::MEMBER),
            Cow::Borrowed(i18n::PAID),
            Cow::Borrowed(i18n::OWED),
            Cow::Borrowed(i18n::BALANCE),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&headers)
            .rows(person_balances.iter().map(|person| {
                [
                    format_member_label(person.id, member_directory),
                    Cow::Owned(self.currency.format(person.paid)),
                    Cow::Owned(self.currency.format(person.owed)),
                    Cow::Owned(self.currency.format_signed(person.net)),
                ]
            }))
            .build()
    }

    pub fn build_transfer_table(
        &self,
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let headers = [
            Cow::Borrowed(i18n::FROM),
            Cow::Borrowed(i18n::TO),
            Cow::Borrowed(i18n::AMOUNT),
        ];
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&headers)
            .rows(transfers.iter().map(|transfer| {
                [
                    format_member_label(transfer.from, member_directory),
                    format_member_label(transfer.to, member_directory),
                    Cow::Owned(self.currency.format(transfer.amount)),
                ]
            }))
            .build()
    }

    fn settlement_lines(
        &self,
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> Vec<String> {
        transfers
            .iter()
            .map(|transfer| {
                i18n::should_pay(
                    format_member_label(transfer.from, member_directory),
                    self.currency.format(transfer.amount),
                    format_member_label(transfer.to, member_directory),
                )
            })
            .collect()
    }
}

fn format_member_label<'a>(
    member_id: MemberId,
    member_directory: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match member_directory.display_name(member_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(member_id.to_string()),
    }
}

#[cfg(all(test, not(feature = "ja")))]
mod tests {
    use super::*;
    use groupsplit_application::{GroupId, GroupInfo};
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn person(id: u64, paid: i64, owed: i64) -> PersonBalance {
        PersonBalance {
            id: MemberId(id),
            paid: Money::from_i64(paid),
            owed: Money::from_i64(owed),
            net: Money::from_i64(paid - owed),
        }
    }

    fn view(transfers: Vec<Transfer>) -> LedgerView {
        LedgerView {
            group: GroupInfo {
                id: GroupId(1),
                name: "Trip".to_string(),
                created_by: MemberId(1),
                invite_code: "deadbeef".to_string(),
            },
            balances: vec![person(1, 20, 10), person(2, 0, 10)],
            unmatched: Vec::new(),
            transfers,
            group_total: Money::from_i64(20),
        }
    }

    #[fixture]
    fn presenter() -> SettlementPresenter {
        SettlementPresenter::new(CurrencyFormat::default())
    }

    #[fixture]
    fn directory() -> HashMap<MemberId, String> {
        HashMap::from([
            (MemberId(1), "Alice".to_string()),
            (MemberId(2), "Bob".to_string()),
        ])
    }

    #[rstest]
    fn render_uses_display_names(presenter: SettlementPresenter, directory: HashMap<MemberId, String>) {
        let rendered = presenter.render_with_members(
            &view(vec![Transfer {
                from: MemberId(2),
                to: MemberId(1),
                amount: Money::from_i64(10),
            }]),
            &directory,
        );

        assert!(rendered.balance_table.contains("Alice"));
        assert!(rendered.balance_table.contains("+$10.00"));
        assert!(rendered.balance_table.contains("-$10.00"));
        assert_eq!(
            rendered.settlement_lines,
            vec!["Bob should pay $10.00 to Alice.".to_string()]
        );
        assert!(rendered.transfer_table.is_some());
        assert!(rendered.unmatched_table.is_none());
        assert_eq!(rendered.group_total, "$20.00");
    }

    #[rstest]
    fn settled_view_says_so(presenter: SettlementPresenter, directory: HashMap<MemberId, String>) {
        let rendered = presenter.render_with_members(&view(Vec::new()), &directory);

        assert!(rendered.transfer_table.is_none());
        assert_eq!(rendered.settlement_lines, vec!["All settled!".to_string()]);
        assert!(rendered.to_text().contains("All settled!"));
    }

    #[rstest]
    fn missing_names_fall_back_to_ids(presenter: SettlementPresenter) {
        let empty: HashMap<MemberId, String> = HashMap::new();

        let rendered = presenter.render_with_members(&view(Vec::new()), &empty);

        assert!(rendered.balance_table.contains("#1"));
        assert!(rendered.balance_table.contains("#2"));
    }

    #[rstest]
    #[case::positive(dec!(3.333333), "$3.33", "+$3.33")]
    #[case::half_up(dec!(2.005), "$2.01", "+$2.01")]
    #[case::negative(dec!(-4), "-$4.00", "-$4.00")]
    #[case::zero(dec!(0), "$0.00", "$0.00")]
    #[case::rounds_to_zero(dec!(-0.001), "$0.00", "$0.00")]
    fn currency_formatting(
        #[case] amount: rust_decimal::Decimal,
        #[case] plain: &str,
        #[case] signed: &str,
    ) {
        let currency = CurrencyFormat::default();
        assert_eq!(currency.format(Money::new(amount)), plain);
        assert_eq!(currency.format_signed(Money::new(amount)), signed);
    }

    #[rstest]
    fn custom_symbol_and_scale() {
        let currency = CurrencyFormat {
            symbol: "¥".to_string(),
            scale: 0,
        };
        assert_eq!(currency.format(Money::new(dec!(1234.5))), "¥1235");
    }
}
