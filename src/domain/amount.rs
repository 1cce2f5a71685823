//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw token amount in the smallest unit of its ledger.
///
/// `Amount` never interprets decimals; 18-decimal and 6-decimal tokens
/// share the same integer representation and scaling is left to
/// presentation code via [`Decimals`](super::Decimals).
///
/// Arithmetic methods are checked and return `None` on overflow or
/// underflow. The [`CheckedArithmetic`] trait lifts
/// them into [`EngineError`](crate::error::EngineError) results.
///
/// Serialized as a bare integer.
///
/// [`CheckedArithmetic`]: crate::math::CheckedArithmetic
///
/// # Examples
///
/// ```
/// use lens_engine::domain::Amount;
///
/// let price = Amount::new(100);
/// let fee = Amount::new(5);
/// assert_eq!(price.checked_sub(&fee), Some(Amount::new(95)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Creates `whole * 10^decimals`, the raw amount of `whole` display units.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub const fn units(whole: u128, decimals: u8) -> Option<Self> {
        let Some(scale) = 10u128.checked_pow(decimals as u32) else {
            return None;
        };
        match whole.checked_mul(scale) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Absolute difference, used for balance-delta checks.
    pub const fn abs_diff(&self, other: &Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
