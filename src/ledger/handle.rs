//! Ledger access scoped to one account.

use super::Ledgers;
use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::events::EventLog;

/// The ledger view handed to an external collaborator.
///
/// Every mutation acts as `holder`: transfers debit only the holder,
/// `transfer_from` spends only allowances granted to the holder, and
/// mint and burn succeed only for tokens the holder is minter of. The
/// engine binds the holder to the address it deployed the collaborator
/// under, so a collaborator cannot move balances it was not given.
#[derive(Debug)]
pub struct LedgerHandle<'a> {
    ledgers: &'a mut Ledgers,
    events: &'a mut EventLog,
    holder: Address,
}

impl<'a> LedgerHandle<'a> {
    pub(crate) fn new(ledgers: &'a mut Ledgers, events: &'a mut EventLog, holder: Address) -> Self {
        Self {
            ledgers,
            events,
            holder,
        }
    }

    /// The account this handle acts as.
    #[must_use]
    pub const fn holder(&self) -> Address {
        self.holder
    }

    /// Balance of `owner` on `token`.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::balance_of`].
    pub fn balance_of(&self, token: Address, owner: Address) -> Result<Amount> {
        self.ledgers.balance_of(token, owner)
    }

    /// Allowance of `spender` over `owner`'s `token`.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::allowance`].
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount> {
        self.ledgers.allowance(token, owner, spender)
    }

    /// Moves the holder's own tokens to `to`.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::transfer`].
    pub fn transfer(&mut self, token: Address, to: Address, amount: Amount) -> Result<()> {
        self.ledgers
            .transfer(self.events, token, self.holder, to, amount)
    }

    /// Spends `owner`'s allowance to the holder.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::transfer_from`].
    pub fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.ledgers
            .transfer_from(self.events, token, self.holder, owner, to, amount)
    }

    /// Lets `spender` move the holder's tokens.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::approve`].
    pub fn approve(&mut self, token: Address, spender: Address, amount: Amount) -> Result<()> {
        self.ledgers
            .approve(self.events, token, self.holder, spender, amount)
    }

    /// Mints with the holder as minter.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::mint`].
    pub fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<()> {
        self.ledgers
            .mint(self.events, self.holder, token, to, amount)
    }

    /// Burns with the holder as minter.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::burn`].
    pub fn burn(&mut self, token: Address, from: Address, amount: Amount) -> Result<()> {
        self.ledgers
            .burn(self.events, self.holder, token, from, amount)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token};
    use crate::error::EngineError;

    const ISSUER: Address = Address::from_low_u64(1);
    const HOLDER: Address = Address::from_low_u64(2);
    const POOL: Address = Address::from_low_u64(3);
    const USER: Address = Address::from_low_u64(4);
    const USDT: Address = Address::from_low_u64(30);

    fn funded() -> (Ledgers, EventLog) {
        let mut ledgers = Ledgers::new();
        let mut events = EventLog::new();
        let Ok(token) = Token::new(USDT, "USDT", Decimals::STABLE) else {
            panic!("token");
        };
        let Ok(()) = ledgers.register(token, ISSUER) else {
            panic!("register");
        };
        for (to, amount) in [(HOLDER, 100), (POOL, 1_000), (USER, 50)] {
            let Ok(()) = ledgers.mint(&mut events, ISSUER, USDT, to, Amount::new(amount)) else {
                panic!("fund {to}");
            };
        }
        (ledgers, events)
    }

    #[test]
    fn transfers_debit_the_holder_only() {
        let (mut ledgers, mut events) = funded();
        let mut handle = LedgerHandle::new(&mut ledgers, &mut events, HOLDER);
        let Ok(()) = handle.transfer(USDT, USER, Amount::new(40)) else {
            panic!("own transfer");
        };
        assert_eq!(
            handle.transfer(USDT, USER, Amount::new(61)),
            Err(EngineError::InsufficientBalance)
        );
        assert_eq!(handle.balance_of(USDT, HOLDER), Ok(Amount::new(60)));
        assert_eq!(handle.balance_of(USDT, POOL), Ok(Amount::new(1_000)));
    }

    #[test]
    fn other_accounts_need_an_allowance() {
        let (mut ledgers, mut events) = funded();
        let mut handle = LedgerHandle::new(&mut ledgers, &mut events, HOLDER);
        assert_eq!(
            handle.transfer_from(USDT, POOL, HOLDER, Amount::new(1)),
            Err(EngineError::InsufficientAllowance)
        );
        let Ok(()) = ledgers.approve(&mut events, USDT, USER, HOLDER, Amount::new(20)) else {
            panic!("approve");
        };
        let mut handle = LedgerHandle::new(&mut ledgers, &mut events, HOLDER);
        let Ok(()) = handle.transfer_from(USDT, USER, HOLDER, Amount::new(20)) else {
            panic!("allowed pull");
        };
        assert_eq!(handle.allowance(USDT, USER, HOLDER), Ok(Amount::ZERO));
        assert_eq!(ledgers.balance_of(USDT, POOL), Ok(Amount::new(1_000)));
    }

    #[test]
    fn supply_changes_need_the_minter() {
        let (mut ledgers, mut events) = funded();
        let mut handle = LedgerHandle::new(&mut ledgers, &mut events, HOLDER);
        assert_eq!(
            handle.mint(USDT, HOLDER, Amount::new(1)),
            Err(EngineError::Unauthorized)
        );
        assert_eq!(
            handle.burn(USDT, POOL, Amount::new(1)),
            Err(EngineError::Unauthorized)
        );
        let mut issuer = LedgerHandle::new(&mut ledgers, &mut events, ISSUER);
        let Ok(()) = issuer.burn(USDT, USER, Amount::new(50)) else {
            panic!("minter burn");
        };
        assert_eq!(ledgers.total_supply(USDT), Ok(Amount::new(1_100)));
    }
}
