//! Token ledger blueprints.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Decimals, Token};
use crate::error::{EngineError, Result};
use crate::math::CheckedArithmetic;

/// A balance credited when the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Account credited.
    pub holder: Address,
    /// Amount minted to it.
    pub amount: Amount,
}

/// Configuration of one token ledger.
///
/// # Validation
///
/// - The address and symbol must form a valid [`Token`].
/// - The minter and every genesis holder must not be the native key.
/// - Genesis allocations must not overflow the supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    address: Address,
    symbol: String,
    decimals: Decimals,
    minter: Address,
    #[serde(default)]
    genesis: Vec<Allocation>,
}

impl TokenConfig {
    /// Creates a token blueprint with no genesis balances.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        decimals: Decimals,
        minter: Address,
    ) -> Result<Self> {
        let config = Self {
            address,
            symbol: symbol.into(),
            decimals,
            minter,
            genesis: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Adds a genesis allocation.
    #[must_use]
    pub fn with_genesis(mut self, holder: Address, amount: Amount) -> Self {
        self.genesis.push(Allocation { holder, amount });
        self
    }

    /// Validates all invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidToken`] for a bad address or symbol.
    /// - [`EngineError::InvalidConfiguration`] for a native minter or holder.
    /// - [`EngineError::Overflow`] if genesis amounts overflow.
    pub fn validate(&self) -> Result<()> {
        self.token()?;
        if self.minter.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "token minter must not be the native key",
            ));
        }
        validate_genesis(&self.genesis)
    }

    /// Builds the token metadata.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] for a bad address or symbol.
    pub fn token(&self) -> Result<Token> {
        Token::new(self.address, self.symbol.clone(), self.decimals)
    }

    /// Token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account allowed to mint and burn.
    #[must_use]
    pub const fn minter(&self) -> Address {
        self.minter
    }

    /// Display decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Balances credited at build time.
    #[must_use]
    pub fn genesis(&self) -> &[Allocation] {
        &self.genesis
    }
}

/// Checks a list of genesis allocations.
///
/// # Errors
///
/// - [`EngineError::InvalidConfiguration`] if a holder is the native key.
/// - [`EngineError::Overflow`] if the amounts overflow.
pub(crate) fn validate_genesis(genesis: &[Allocation]) -> Result<()> {
    let mut total = Amount::ZERO;
    for allocation in genesis {
        if allocation.holder.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "genesis holder must not be the native key",
            ));
        }
        total = total.safe_add(&allocation.amount)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = TokenConfig::new(addr(10), "LENS", Decimals::MAX, addr(1)) else {
            panic!("expected Ok");
        };
        let cfg = cfg.with_genesis(addr(1), Amount::new(5));
        assert_eq!(cfg.genesis().len(), 1);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.minter(), addr(1));
    }

    #[test]
    fn native_minter_rejected() {
        assert!(matches!(
            TokenConfig::new(addr(10), "LENS", Decimals::MAX, Address::NATIVE),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn genesis_overflow_rejected() {
        let Ok(cfg) = TokenConfig::new(addr(10), "LENS", Decimals::MAX, addr(1)) else {
            panic!("expected Ok");
        };
        let cfg = cfg
            .with_genesis(addr(1), Amount::MAX)
            .with_genesis(addr(2), Amount::new(1));
        assert!(matches!(cfg.validate(), Err(EngineError::Overflow(_))));
    }

    #[test]
    fn genesis_defaults_to_empty_in_json() {
        let json = r#"{"address":"0x0a","symbol":"LENS","decimals":18,"minter":"0x01"}"#;
        let Ok(cfg) = serde_json::from_str::<TokenConfig>(json) else {
            panic!("deserialize");
        };
        assert!(cfg.genesis().is_empty());
        assert_eq!(cfg.address(), addr(10));
    }
}
