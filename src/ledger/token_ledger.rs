//! Balance and allowance bookkeeping for one token.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, Token};
use crate::error::{EngineError, Result};
use crate::math::CheckedArithmetic;

/// The ledger of a single fungible token.
///
/// # Invariants
///
/// - The sum of all balances equals [`total_supply`](Self::total_supply).
/// - No balance is negative; a debit beyond the balance is
///   [`EngineError::InsufficientBalance`], never a wrap.
/// - Allowances only decrease through [`transfer_from`](Self::transfer_from)
///   and are only raised through [`approve`](Self::approve).
///
/// Zero balances and zero allowances are not stored, so two ledgers that
/// hold the same amounts compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedger {
    token: Token,
    minter: Address,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl TokenLedger {
    /// Creates an empty ledger whose supply may only be changed by `minter`.
    #[must_use]
    pub fn new(token: Token, minter: Address) -> Self {
        Self {
            token,
            minter,
            total_supply: Amount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    /// Token metadata.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// The only account allowed to mint and burn.
    #[must_use]
    pub const fn minter(&self) -> Address {
        self.minter
    }

    /// Sum of all balances.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `owner`, zero if never credited.
    pub fn balance_of(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Accounts holding a non-zero balance, ascending.
    pub fn holders(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.balances.iter().map(|(a, b)| (*a, *b))
    }

    /// Creates `amount` new tokens in `to`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the total supply would overflow.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<()> {
        let supply = self.total_supply.safe_add(&amount)?;
        // balance <= supply, so the credit cannot overflow once supply did not
        self.credit(to, amount)?;
        self.total_supply = supply;
        Ok(())
    }

    /// Destroys `amount` tokens from `from`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if `from` holds less.
    pub fn burn(&mut self, from: Address, amount: Amount) -> Result<()> {
        self.debit(from, amount)?;
        self.total_supply = self.total_supply.safe_sub(&amount)?;
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if `from` holds less.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Moves `amount` from `owner` to `to` on behalf of `spender`, consuming
    /// exactly `amount` of the allowance.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InsufficientAllowance`] if the allowance is short.
    ///   Checked before the balance.
    /// - [`EngineError::InsufficientBalance`] if `owner` holds less.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let remaining = self
            .allowance(owner, spender)
            .checked_sub(&amount)
            .ok_or(EngineError::InsufficientAllowance)?;
        self.transfer(owner, to, amount)?;
        self.set_allowance(owner, spender, remaining);
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner`'s tokens to `amount`.
    ///
    /// The previous value is overwritten, not adjusted. A spender watching
    /// for the change can spend the old allowance first and then the new
    /// one; callers who care lower the allowance to zero before raising it.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.set_allowance(owner, spender, amount);
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    fn debit(&mut self, from: Address, amount: Amount) -> Result<()> {
        let left = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(EngineError::InsufficientBalance)?;
        if left.is_zero() {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, left);
        }
        Ok(())
    }

    fn credit(&mut self, to: Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let total = self.balance_of(to).safe_add(&amount)?;
        self.balances.insert(to, total);
        Ok(())
    }
}
