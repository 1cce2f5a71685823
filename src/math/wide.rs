//! 256-bit intermediate arithmetic.
//!
//! Pool pricing multiplies a `u128` input by a basis-point factor and by a
//! `u128` reserve before dividing. Those products are formed in
//! [`U256`] and narrowed back to [`Amount`] only after division.

use primitive_types::U256;

use crate::domain::Amount;
use crate::error::{EngineError, Result};

/// Widens an amount.
#[must_use]
pub fn widen(amount: Amount) -> U256 {
    U256::from(amount.get())
}

/// Checked `a * b` in 256 bits.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if the product exceeds 256 bits.
pub fn mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b)
        .ok_or(EngineError::Overflow("256-bit multiplication overflow"))
}

/// Checked `a + b` in 256 bits.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if the sum exceeds 256 bits.
pub fn add(a: U256, b: U256) -> Result<U256> {
    a.checked_add(b)
        .ok_or(EngineError::Overflow("256-bit addition overflow"))
}

/// `floor(numerator / denominator)` narrowed to an [`Amount`].
///
/// # Errors
///
/// - [`EngineError::DivisionByZero`] if `denominator` is zero.
/// - [`EngineError::Overflow`] if the quotient does not fit in `u128`.
pub fn div_floor(numerator: U256, denominator: U256) -> Result<Amount> {
    if denominator.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    narrow(numerator / denominator)
}

/// Narrows a 256-bit value to an [`Amount`].
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if `value` exceeds `u128::MAX`.
pub fn narrow(value: U256) -> Result<Amount> {
    if value > U256::from(u128::MAX) {
        return Err(EngineError::Overflow("value does not fit in u128"));
    }
    Ok(Amount::new(value.as_u128()))
}

/// `a * b` of two amounts.
///
/// Used for the constant-product invariant `k = reserve_a * reserve_b`;
/// the product of two `u128` values always fits in 256 bits.
#[must_use]
pub fn product(a: Amount, b: Amount) -> U256 {
    widen(a).saturating_mul(widen(b))
}
