//! Swap router blueprint.

use serde::{Deserialize, Serialize};

use crate::domain::Address;
use crate::error::{EngineError, Result};

/// Configuration of the swap router and its fixed wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    address: Address,
    owner: Address,
    #[serde(default)]
    approved_external_routers: Vec<Address>,
}

impl RouterConfig {
    /// Creates a router blueprint with an empty external allowlist.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    pub fn new(address: Address, owner: Address) -> Result<Self> {
        let config = Self {
            address,
            owner,
            approved_external_routers: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Pre-approves an external router.
    #[must_use]
    pub fn with_external_router(mut self, router: Address) -> Self {
        self.approved_external_routers.push(router);
        self
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] for a native address
    /// or an allowlist entry equal to the router itself.
    pub fn validate(&self) -> Result<()> {
        if self.address.is_native() || self.owner.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "router addresses must not be the native key",
            ));
        }
        if self
            .approved_external_routers
            .iter()
            .any(|r| r.is_native() || *r == self.address)
        {
            return Err(EngineError::InvalidConfiguration(
                "invalid external router in allowlist",
            ));
        }
        Ok(())
    }

    /// Router account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account allowed to edit the allowlist.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// External routers approved at build time.
    #[must_use]
    pub fn approved_external_routers(&self) -> &[Address] {
        &self.approved_external_routers
    }
}
