//! Token decimal places.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::{EngineError, Result};

/// Maximum allowed decimal places.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places a token is displayed with.
///
/// Decimals are presentation metadata only: the ledger, the pools and the
/// marketplace all work on raw [`Amount`]s. Valid range is `0..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Six decimals, the stable token convention.
    pub const STABLE: Self = Self(6);

    /// Eighteen decimals, the native and platform token convention.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(EngineError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Raw amount of `whole` display units.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the result exceeds `u128`.
    pub const fn scale_up(&self, whole: u128) -> Result<Amount> {
        match Amount::units(whole, self.0) {
            Some(a) => Ok(a),
            None => Err(EngineError::Overflow("decimal scale_up overflow")),
        }
    }

    /// Whole display units contained in `raw`, truncated.
    #[must_use]
    pub const fn scale_down(&self, raw: Amount) -> u128 {
        raw.get() / 10u128.pow(self.0 as u32)
    }
}

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Decimals {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(d: Decimals) -> Self {
        d.0
    }
}
