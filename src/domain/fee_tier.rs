//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::{EngineError, Result};

/// The fee a pool keeps from every swap input.
///
/// A tier must be strictly below 100%: a pool that keeps the whole input
/// can never produce output.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::FeeTier;
///
/// assert_eq!(FeeTier::default(), FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(FeeTier::TIER_0_30_PERCENT.basis_points().get(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.05% fee, stable pairs.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee, the default for every pool.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a tier from arbitrary basis points.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFee`] if the fee is 100% or more.
    pub const fn new(basis_points: BasisPoints) -> Result<Self> {
        if basis_points.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(EngineError::InvalidFee("swap fee must be below 100%"));
        }
        Ok(Self(basis_points))
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// `10_000 - fee`, the multiplier applied to the input in pricing.
    #[must_use]
    pub const fn input_multiplier(&self) -> u32 {
        BasisPoints::MAX_PERCENT.get() - self.0.get()
    }

    /// The informational fee charged on `amount_in`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the fee does not fit in an amount.
    pub fn fee_on(&self, amount_in: Amount) -> Result<Amount> {
        self.0.apply(amount_in, Rounding::Down)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
