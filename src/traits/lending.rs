//! Lending protocol collaborator.

use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::ledger::LedgerHandle;

/// An external lending pool that takes deposits of one asset and mints an
/// interest-bearing receipt token for them.
///
/// The router treats implementations as untrusted: it never relies on a
/// return value and instead verifies the balance changes a deposit
/// produced. Calls receive a [`LedgerHandle`] acting as the pool's
/// configured address.
pub trait LendingPool {
    /// The pool's own account.
    fn address(&self) -> Address;

    /// The asset accepted for deposit.
    fn asset(&self) -> Address;

    /// The receipt token minted for deposits.
    fn receipt_token(&self) -> Address;

    /// Pulls `amount` of `asset` from `caller` (who has approved the pool)
    /// and credits receipt tokens to `on_behalf_of`.
    ///
    /// # Errors
    ///
    /// Any error; callers map it to
    /// [`EngineError::ExternalCallFailed`](crate::error::EngineError::ExternalCallFailed).
    fn deposit(
        &mut self,
        ledger: LedgerHandle<'_>,
        caller: Address,
        asset: Address,
        amount: Amount,
        on_behalf_of: Address,
    ) -> Result<()>;

    /// Burns `caller`'s receipt tokens and releases `amount` of `asset`
    /// to `to`. Returns the amount released.
    ///
    /// # Errors
    ///
    /// Any error; callers map it to
    /// [`EngineError::ExternalCallFailed`](crate::error::EngineError::ExternalCallFailed).
    fn withdraw(
        &mut self,
        ledger: LedgerHandle<'_>,
        caller: Address,
        asset: Address,
        amount: Amount,
        to: Address,
    ) -> Result<Amount>;
}
