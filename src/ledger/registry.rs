//! Registry routing ledger operations by token address.

use std::collections::BTreeMap;

use tracing::trace;

use super::TokenLedger;
use crate::domain::{Address, Amount, Token};
use crate::error::{EngineError, Result};
use crate::events::{Event, EventLog};

/// Every token ledger known to the engine, keyed by token address.
///
/// The native currency is registered like any other token under
/// [`Address::NATIVE`]. Mutating operations append `Transfer` and
/// `Approval` events to the supplied log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledgers {
    tokens: BTreeMap<Address, TokenLedger>,
}

impl Ledgers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new token whose supply is controlled by `minter`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the address is
    /// already registered.
    pub fn register(&mut self, token: Token, minter: Address) -> Result<()> {
        let address = token.address();
        if self.tokens.contains_key(&address) {
            return Err(EngineError::InvalidConfiguration(
                "token address registered twice",
            ));
        }
        self.tokens.insert(address, TokenLedger::new(token, minter));
        Ok(())
    }

    /// Looks up a ledger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] if nothing is registered there.
    pub fn ledger(&self, token: Address) -> Result<&TokenLedger> {
        self.tokens.get(&token).ok_or(EngineError::UnknownToken)
    }

    fn ledger_mut(&mut self, token: Address) -> Result<&mut TokenLedger> {
        self.tokens.get_mut(&token).ok_or(EngineError::UnknownToken)
    }

    /// Registered token addresses, ascending.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values().map(TokenLedger::token)
    }

    /// Whether `account` controls the supply of any registered token.
    #[must_use]
    pub fn is_minter(&self, account: Address) -> bool {
        self.tokens.values().any(|l| l.minter() == account)
    }

    /// Balance of `owner` on `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn balance_of(&self, token: Address, owner: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.balance_of(owner))
    }

    /// Allowance of `spender` over `owner`'s `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.allowance(owner, spender))
    }

    /// Total supply of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn total_supply(&self, token: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.total_supply())
    }

    /// Mints on behalf of `caller`, who must be the token's minter.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownToken`] for unregistered tokens.
    /// - [`EngineError::Unauthorized`] if `caller` is not the minter.
    /// - [`EngineError::Overflow`] if the supply would overflow.
    pub fn mint(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        token: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let ledger = self.ledger_mut(token)?;
        if ledger.minter() != caller {
            return Err(EngineError::Unauthorized);
        }
        ledger.mint(to, amount)?;
        trace!(%token, %to, %amount, "mint");
        events.push(Event::Transfer {
            token,
            from: None,
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Burns `from`'s tokens on behalf of `caller`, who must be the minter.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownToken`] for unregistered tokens.
    /// - [`EngineError::Unauthorized`] if `caller` is not the minter.
    /// - [`EngineError::InsufficientBalance`] if `from` holds less.
    pub fn burn(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        token: Address,
        from: Address,
        amount: Amount,
    ) -> Result<()> {
        let ledger = self.ledger_mut(token)?;
        if ledger.minter() != caller {
            return Err(EngineError::Unauthorized);
        }
        ledger.burn(from, amount)?;
        trace!(%token, %from, %amount, "burn");
        events.push(Event::Transfer {
            token,
            from: Some(from),
            to: None,
            amount,
        });
        Ok(())
    }

    /// Moves `from`'s own tokens.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownToken`] for unregistered tokens.
    /// - [`EngineError::InsufficientBalance`] if `from` holds less.
    pub fn transfer(
        &mut self,
        events: &mut EventLog,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.ledger_mut(token)?.transfer(from, to, amount)?;
        events.push(Event::Transfer {
            token,
            from: Some(from),
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Moves `owner`'s tokens on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownToken`] for unregistered tokens.
    /// - [`EngineError::InsufficientAllowance`], then
    ///   [`EngineError::InsufficientBalance`].
    pub fn transfer_from(
        &mut self,
        events: &mut EventLog,
        token: Address,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.ledger_mut(token)?
            .transfer_from(spender, owner, to, amount)?;
        events.push(Event::Transfer {
            token,
            from: Some(owner),
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Overwrites the allowance of `spender` over `owner`'s `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn approve(
        &mut self,
        events: &mut EventLog,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.ledger_mut(token)?.approve(owner, spender, amount);
        events.push(Event::Approval {
            token,
            owner,
            spender,
            amount,
        });
        Ok(())
    }
}
