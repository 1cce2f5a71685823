//! Lending collaborator blueprint.

use serde::{Deserialize, Serialize};

use super::TokenConfig;
use crate::domain::Address;
use crate::error::{EngineError, Result};

/// Configuration of the lending pool the router deposits into.
///
/// The receipt token is minted and burned by the lending pool, so its
/// minter must be the pool's own address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingConfig {
    address: Address,
    asset: Address,
    receipt: TokenConfig,
}

impl LendingConfig {
    /// Creates a lending blueprint.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    pub fn new(address: Address, asset: Address, receipt: TokenConfig) -> Result<Self> {
        let config = Self {
            address,
            asset,
            receipt,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the receipt token
    /// is not minted by the pool, has genesis balances, or an address is
    /// the native key.
    pub fn validate(&self) -> Result<()> {
        self.receipt.validate()?;
        if self.address.is_native() || self.asset.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "lending addresses must not be the native key",
            ));
        }
        if self.receipt.minter() != self.address {
            return Err(EngineError::InvalidConfiguration(
                "receipt token must be minted by the lending pool",
            ));
        }
        if !self.receipt.genesis().is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "receipt token cannot have genesis balances",
            ));
        }
        Ok(())
    }

    /// Lending pool account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Asset accepted for deposit.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.asset
    }

    /// Interest-bearing receipt token.
    #[must_use]
    pub const fn receipt(&self) -> &TokenConfig {
        &self.receipt
    }
}
