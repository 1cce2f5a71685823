//! AMM pool engine blueprint.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, FeeTier};
use crate::error::{EngineError, Result};

/// Configuration of the pool engine: its account address and the fee tier
/// every pool it seeds will charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    address: Address,
    #[serde(default)]
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a pool engine blueprint.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    pub fn new(address: Address, fee_tier: FeeTier) -> Result<Self> {
        let config = Self { address, fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] for the native address.
    /// - [`EngineError::InvalidFee`] for a fee of 100% or more.
    pub fn validate(&self) -> Result<()> {
        if self.address.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "pool engine address must not be the native key",
            ));
        }
        FeeTier::new(self.fee_tier.basis_points())?;
        Ok(())
    }

    /// Account holding pool reserves.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Swap fee for new pools.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
