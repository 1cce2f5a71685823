//! Token metadata.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Decimals};
use crate::error::{EngineError, Result};

/// The identity and display metadata of a registered token.
///
/// Only the address takes part in ledger routing; symbol and decimals are
/// carried for presentation and events.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::{Address, Decimals, Token};
///
/// let usdt = Token::new(Address::from_low_u64(3), "USDT", Decimals::STABLE)
///     .expect("valid token");
/// assert_eq!(usdt.symbol(), "USDT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    symbol: String,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if the address is the reserved
    /// native key or the symbol is empty.
    pub fn new(address: Address, symbol: impl Into<String>, decimals: Decimals) -> Result<Self> {
        let symbol = symbol.into();
        if address.is_native() {
            return Err(EngineError::InvalidToken(
                "token address collides with the native key",
            ));
        }
        if symbol.trim().is_empty() {
            return Err(EngineError::InvalidToken("token symbol must not be empty"));
        }
        Ok(Self {
            address,
            symbol,
            decimals,
        })
    }

    /// The native currency pseudo-token.
    #[must_use]
    pub fn native() -> Self {
        Self {
            address: Address::NATIVE,
            symbol: "ETH".to_owned(),
            decimals: Decimals::MAX,
        }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the display decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Raw amount of `whole` display units of this token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the result exceeds `u128`.
    pub const fn to_raw_amount(&self, whole: u128) -> Result<Amount> {
        self.decimals.scale_up(whole)
    }
}
