use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

use crate::op;

//--------------------------------------     TokenAmount       -------------------------------------------------------
/// An asset amount in the asset's smallest unit (wei for the native coin, the token's base unit for ERC-20 tokens).
///
/// Amounts are unsigned and carry no decimal-scale information of their own; the scale lives with the asset
/// descriptor. 128 bits covers every realistically observable balance, and anything wider is treated as a malformed
/// node response rather than silently truncated.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

op!(binary TokenAmount, Add, add);
op!(binary TokenAmount, Sub, sub);
op!(inplace TokenAmount, AddAssign, add_assign);

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TokenAmount {
    pub const fn value(&self) -> u128 {
        self.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}
