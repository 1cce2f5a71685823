//! Constant-product pool state and pricing.
//!
//! The swap invariant is `x × y = k`. The fee is applied as a multiplier on
//! the input inside the pricing formula, and the whole input is added to
//! the reserve, so `k` grows by the fee on every swap.
//!
//! # Pricing (exact input)
//!
//! ```text
//!                 amount_in · (10 000 − fee_bps) · reserve_out
//! amount_out = ─────────────────────────────────────────────────
//!               reserve_in · 10 000 + amount_in · (10 000 − fee_bps)
//! ```
//!
//! All products are formed in 256 bits and the quotient is floored.
//!
//! # Reserve update
//!
//! 1. `reserve_in += amount_in`
//! 2. `reserve_out -= amount_out`

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, BasisPoints, FeeTier, PairKey, PairSeed, SwapOutcome};
use crate::error::{EngineError, Result};
use crate::math::{wide, CheckedArithmetic};

/// Output of an exact-input swap against the given reserves.
///
/// Returns zero when the input is too small to move the pool; callers
/// decide whether that is an error.
///
/// # Errors
///
/// - [`EngineError::ZeroAmount`] if `amount_in` is zero.
/// - [`EngineError::InsufficientLiquidity`] if either reserve is zero.
/// - [`EngineError::Overflow`] if an intermediate exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::{Amount, FeeTier};
/// use lens_engine::pools::amount_out;
///
/// let out = amount_out(
///     Amount::new(1_000),
///     Amount::new(500_000),
///     Amount::new(10_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert_eq!(out, Ok(Amount::new(19)));
/// ```
pub fn amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(EngineError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(EngineError::InsufficientLiquidity);
    }
    let in_with_fee = wide::mul(wide::widen(amount_in), U256::from(fee.input_multiplier()))?;
    let numerator = wide::mul(in_with_fee, wide::widen(reserve_out))?;
    let scaled_reserve = wide::mul(
        wide::widen(reserve_in),
        U256::from(BasisPoints::MAX_PERCENT.get()),
    )?;
    let denominator = wide::add(scaled_reserve, in_with_fee)?;
    wide::div_floor(numerator, denominator)
}

/// A seeded constant-product pool.
///
/// Reserves are stored in canonical order: `reserve_a` belongs to
/// [`PairKey::token_a`], the lower address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    pair: PairKey,
    fee_tier: FeeTier,
    provider: Address,
    reserve_a: Amount,
    reserve_b: Amount,
    accumulated_fees_a: Amount,
    accumulated_fees_b: Amount,
}

impl ConstantProductPool {
    /// Creates a pool holding the seed's amounts.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if either amount is zero.
    /// - [`EngineError::InvalidToken`] if both tokens are the same.
    pub fn seeded(seed: &PairSeed, fee_tier: FeeTier, provider: Address) -> Result<Self> {
        if seed.amount_a.is_zero() || seed.amount_b.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let pair = PairKey::new(seed.token_a, seed.token_b)?;
        let (reserve_a, reserve_b) = if pair.token_a() == seed.token_a {
            (seed.amount_a, seed.amount_b)
        } else {
            (seed.amount_b, seed.amount_a)
        };
        Ok(Self {
            pair,
            fee_tier,
            provider,
            reserve_a,
            reserve_b,
            accumulated_fees_a: Amount::ZERO,
            accumulated_fees_b: Amount::ZERO,
        })
    }

    /// The canonical pair.
    #[must_use]
    pub const fn pair(&self) -> PairKey {
        self.pair
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// The account that supplied the initial liquidity.
    #[must_use]
    pub const fn provider(&self) -> Address {
        self.provider
    }

    /// Reserve of the lower-address token.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of the higher-address token.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Lifetime fees retained on the `token_a` side.
    #[must_use]
    pub const fn accumulated_fees_a(&self) -> Amount {
        self.accumulated_fees_a
    }

    /// Lifetime fees retained on the `token_b` side.
    #[must_use]
    pub const fn accumulated_fees_b(&self) -> Amount {
        self.accumulated_fees_b
    }

    /// `reserve_a × reserve_b`.
    #[must_use]
    pub fn k(&self) -> U256 {
        wide::product(self.reserve_a, self.reserve_b)
    }

    /// `(reserve_in, reserve_out)` for a sale of `token_in`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if `token_in` is not in the pair.
    pub fn reserves_for(&self, token_in: Address) -> Result<(Amount, Amount)> {
        if self.pair.is_a_side(token_in)? {
            Ok((self.reserve_a, self.reserve_b))
        } else {
            Ok((self.reserve_b, self.reserve_a))
        }
    }

    /// Output for selling `amount_in` of `token_in`, without state change.
    ///
    /// # Errors
    ///
    /// See [`amount_out`] and [`reserves_for`](Self::reserves_for).
    pub fn quote(&self, token_in: Address, amount_in: Amount) -> Result<Amount> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        amount_out(amount_in, reserve_in, reserve_out, self.fee_tier)
    }

    /// Books a swap whose output was already priced by [`quote`](Self::quote).
    ///
    /// # Errors
    ///
    /// - [`EngineError::InsufficientLiquidity`] if `amount_out` is zero or
    ///   would drain the output reserve.
    /// - [`EngineError::Overflow`] if the input reserve would overflow.
    pub fn apply_swap(
        &mut self,
        token_in: Address,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<SwapOutcome> {
        let a_to_b = self.pair.is_a_side(token_in)?;
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(EngineError::InsufficientLiquidity);
        }
        let fee = self.fee_tier.fee_on(amount_in)?;
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        let token_out = if a_to_b {
            self.reserve_a = new_in;
            self.reserve_b = new_out;
            self.accumulated_fees_a = self.accumulated_fees_a.safe_add(&fee)?;
            self.pair.token_b()
        } else {
            self.reserve_b = new_in;
            self.reserve_a = new_out;
            self.accumulated_fees_b = self.accumulated_fees_b.safe_add(&fee)?;
            self.pair.token_a()
        };
        SwapOutcome::new(token_in, token_out, amount_in, amount_out, fee)
    }
}
