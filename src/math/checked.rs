//! Result-returning arithmetic on [`Amount`].
//!
//! The inherent `checked_*` methods on [`Amount`] return `Option`; ledger
//! and settlement code wants a typed [`EngineError`] it can propagate with
//! `?`. [`CheckedArithmetic`] bridges the two.
//!
//! # Examples
//!
//! ```
//! use lens_engine::domain::Amount;
//! use lens_engine::math::CheckedArithmetic;
//!
//! let total = Amount::new(95).safe_add(&Amount::new(5));
//! assert_eq!(total, Ok(Amount::new(100)));
//! ```

use crate::domain::Amount;
use crate::error::{EngineError, Result};

/// Fallible arithmetic for amount-like values.
///
/// No method panics or saturates; every failure is an `Err` naming the
/// failing operation.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(EngineError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(EngineError::Underflow("amount subtraction underflow"))
    }
}
