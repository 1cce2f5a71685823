//! Outcome of a single-pool swap.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, Amount};
use crate::error::{EngineError, Result};

/// Amounts exchanged by one executed hop.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`; the fee is informational and already contained in
///   `amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOutcome {
    token_in: Address,
    token_out: Address,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapOutcome {
    /// Creates a new outcome with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `amount_in` is zero.
    /// - [`EngineError::InsufficientLiquidity`] if `amount_out` is zero.
    /// - [`EngineError::InvalidFee`] if `fee >= amount_in`.
    pub const fn new(
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        if amount_out.is_zero() {
            return Err(EngineError::InsufficientLiquidity);
        }
        if fee.get() >= amount_in.get() {
            return Err(EngineError::InvalidFee("fee must be less than amount_in"));
        }
        Ok(Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Token paid in.
    #[must_use]
    pub const fn token_in(&self) -> Address {
        self.token_in
    }

    /// Token paid out.
    #[must_use]
    pub const fn token_out(&self) -> Address {
        self.token_out
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapOutcome(in: {}, out: {}, fee: {})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}
