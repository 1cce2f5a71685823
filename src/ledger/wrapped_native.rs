//! Wrapped native currency.
//!
//! The wrapper contract holds native value in its own native balance and
//! mints the same amount of its token. It is the token's minter, so nobody
//! else can create or destroy wrapped supply:
//!
//! | Operation | Native ledger | Wrapped ledger |
//! |-----------|---------------|----------------|
//! | `wrap` | payer → wrapper | mint to recipient |
//! | `unwrap` | wrapper → holder | burn from holder |
//!
//! Native held by the wrapper therefore always equals the wrapped supply.

use super::Ledgers;
use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::events::{Event, EventLog};

/// The wrapped-native token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedNative {
    address: Address,
}

impl WrappedNative {
    /// Binds to the wrapped token registered at `address`, which must name
    /// itself as minter.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Address of the wrapped token and of the contract holding the native
    /// backing.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Locks `amount` of `payer`'s native currency and credits `recipient`
    /// with the same amount of wrapped token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if `payer` holds less
    /// native currency.
    ///
    /// [`EngineError::InsufficientBalance`]: crate::error::EngineError::InsufficientBalance
    pub fn wrap(
        &self,
        ledgers: &mut Ledgers,
        events: &mut EventLog,
        payer: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<()> {
        ledgers.transfer(events, Address::NATIVE, payer, self.address, amount)?;
        ledgers.mint(events, self.address, self.address, recipient, amount)?;
        events.push(Event::Wrapped {
            account: recipient,
            amount,
        });
        Ok(())
    }

    /// Burns `amount` of `holder`'s wrapped token and releases the same
    /// amount of native currency to them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if `holder` holds less
    /// wrapped token.
    ///
    /// [`EngineError::InsufficientBalance`]: crate::error::EngineError::InsufficientBalance
    pub fn unwrap(
        &self,
        ledgers: &mut Ledgers,
        events: &mut EventLog,
        holder: Address,
        amount: Amount,
    ) -> Result<()> {
        ledgers.burn(events, self.address, self.address, holder, amount)?;
        ledgers.transfer(events, Address::NATIVE, self.address, holder, amount)?;
        events.push(Event::Unwrapped {
            account: holder,
            amount,
        });
        Ok(())
    }

    /// Native currency currently backing the wrapped supply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] if the native ledger is missing.
    ///
    /// [`EngineError::UnknownToken`]: crate::error::EngineError::UnknownToken
    pub fn backing(&self, ledgers: &Ledgers) -> Result<Amount> {
        ledgers.balance_of(Address::NATIVE, self.address)
    }
}
