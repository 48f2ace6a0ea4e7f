#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const PAID: &str = "支払額";
    pub const OWED: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const BALANCES_HEADING: &str = "収支一覧";
    pub const SETTLEMENTS_HEADING: &str = "精算";
    pub const UNMATCHED_HEADING: &str = "グループ外のID";
    pub const GROUP_TOTAL: &str = "グループ合計";
    pub const ALL_SETTLED: &str = "精算済みです！";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const OWED: &str = "Owes";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const BALANCES_HEADING: &str = "Balances";
    pub const SETTLEMENTS_HEADING: &str = "Settlement Summary";
    pub const UNMATCHED_HEADING: &str = "Not in this group";
    pub const GROUP_TOTAL: &str = "Group total";
    pub const ALL_SETTLED: &str = "All settled!";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn should_pay(from: impl std::fmt::Display, amount: impl std::fmt::Display, to: impl std::fmt::Display) -> String {
    format!("{from} さんが {to} さんに {amount} を支払います")
}

#[cfg(not(feature = "ja"))]
pub fn should_pay(from: impl std::fmt::Display, amount: impl std::fmt::Display, to: impl std::fmt::Display) -> String {
    format!("{from} should pay {amount} to {to}.")
}
