//! Marketplace blueprint.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints};
use crate::error::{EngineError, Result};

/// Configuration of the course marketplace.
///
/// # Validation
///
/// - `fee_bps <= 10_000`.
/// - No address is the native key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    address: Address,
    owner: Address,
    payment_token: Address,
    fee_recipient: Address,
    #[serde(default = "MarketConfig::default_fee_bps")]
    fee_bps: BasisPoints,
}

impl MarketConfig {
    /// Fee charged on every sale unless configured otherwise (5%).
    pub const DEFAULT_FEE_BPS: BasisPoints = BasisPoints::new(500);

    fn default_fee_bps() -> BasisPoints {
        Self::DEFAULT_FEE_BPS
    }

    /// Creates a marketplace blueprint.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    pub fn new(
        address: Address,
        owner: Address,
        payment_token: Address,
        fee_recipient: Address,
        fee_bps: BasisPoints,
    ) -> Result<Self> {
        let config = Self {
            address,
            owner,
            payment_token,
            fee_recipient,
            fee_bps,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidFee`] if `fee_bps` exceeds 100%.
    /// - [`EngineError::InvalidConfiguration`] for a native address.
    pub fn validate(&self) -> Result<()> {
        BasisPoints::validated(self.fee_bps.get())?;
        let addresses = [
            self.address,
            self.owner,
            self.payment_token,
            self.fee_recipient,
        ];
        if addresses.iter().any(Address::is_native) {
            return Err(EngineError::InvalidConfiguration(
                "marketplace addresses must not be the native key",
            ));
        }
        Ok(())
    }

    /// Marketplace account (the spender buyers approve).
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account allowed to change fee parameters.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Token prices are denominated in.
    #[must_use]
    pub const fn payment_token(&self) -> Address {
        self.payment_token
    }

    /// Account receiving the fee share.
    #[must_use]
    pub const fn fee_recipient(&self) -> Address {
        self.fee_recipient
    }

    /// Fee share of every sale.
    #[must_use]
    pub const fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }
}
