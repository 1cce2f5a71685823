//! Basis-point representation for percentages.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::{EngineError, Result};
use crate::math::wide;

/// Denominator that represents 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Any `u32` can be held; [`validated`](Self::validated) rejects values
/// above 100% at configuration boundaries.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(500);
/// assert_eq!(fee.apply(Amount::new(100), Rounding::Down), Ok(Amount::new(5)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a `BasisPoints`, rejecting values above 100%.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFee`] if `value > 10_000`.
    pub const fn validated(value: u32) -> Result<Self> {
        if value > BPS_DENOMINATOR {
            return Err(EngineError::InvalidFee("basis points exceed 100%"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// `10_000 - self`, the share kept after the percentage is taken.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFee`] if the value exceeds 100%.
    pub const fn complement(&self) -> Result<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Ok(Self(v)),
            None => Err(EngineError::InvalidFee("basis points exceed 100%")),
        }
    }

    /// Computes `amount * self / 10_000` with explicit rounding. The
    /// product is formed in 256 bits, so any amount can be scaled.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the result exceeds `u128`,
    /// which only happens above 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        let product = wide::mul(wide::widen(amount), U256::from(self.0))?;
        let divisor = U256::from(BPS_DENOMINATOR);
        let quotient = wide::narrow(product / divisor)?;
        let remainder = (product % divisor).low_u128();
        rounding
            .settle(quotient.get(), remainder)
            .map(Amount::new)
            .ok_or(EngineError::Overflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
