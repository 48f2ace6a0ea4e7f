use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
}

impl Member {
    pub fn new(id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Exact decimal amount in the group's single currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Builds an amount from integer minor units, e.g. cents with `scale = 2`.
    pub fn from_minor_units(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// `self / count`, or `None` when `count` is zero.
    ///
    /// Non-terminating quotients (10 / 3) are truncated at the decimal's
    /// precision, so the parts may miss the whole by a unit in the last place.
    pub fn split_evenly(self, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(count)).map(Self)
    }

    /// Rounds half away from zero to `scale` decimal places.
    pub fn round_to_scale(self, scale: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Magnitude at or below which a balance counts as settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tolerance(Money);

impl Tolerance {
    /// One cent.
    pub const ONE_CENT: Self = Self(Money(Decimal::from_parts(1, 0, 0, false, 2)));
    pub const EXACT: Self = Self(Money::ZERO);

    pub fn new(amount: Money) -> Self {
        Self(amount.abs())
    }

    pub fn amount(self) -> Money {
        self.0
    }

    pub fn is_settled(self, amount: Money) -> bool {
        amount.abs() <= self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::ONE_CENT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share {
    pub beneficiary: MemberId,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub payer: MemberId,
    pub amount: Money,
    pub shares: Vec<Share>,
}

impl Transaction {
    /// A transaction without explicit shares; see
    /// [`BalanceAccumulator`](crate::BalanceAccumulator) for how it is split.
    pub fn new(id: TransactionId, payer: MemberId, amount: Money) -> Self {
        Self {
            id,
            payer,
            amount,
            shares: Vec::new(),
        }
    }

    pub fn with_share(mut self, beneficiary: MemberId, amount: Money) -> Self {
        self.shares.push(Share {
            beneficiary,
            amount,
        });
        self
    }

    pub fn has_explicit_shares(&self) -> bool {
        !self.shares.is_empty()
    }

    pub fn share_total(&self) -> Money {
        self.shares.iter().map(|share| share.amount).sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberBalance {
    pub paid: Money,
    pub owed: Money,
}

impl MemberBalance {
    /// Positive when the group owes the member.
    pub fn net(&self) -> Money {
        self.paid - self.owed
    }
}

/// Balances keyed by member, iterated in insertion (member) order.
pub type MemberBalances = IndexMap<MemberId, MemberBalance>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub balances: MemberBalances,
    pub transfers: Vec<Transfer>,
    /// Ids that appear in transactions but not in the member list.
    pub unmatched: Vec<MemberId>,
}

impl Settlement {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
