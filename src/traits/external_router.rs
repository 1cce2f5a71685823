//! Off-chain quoted swap executors.

use crate::domain::Address;
use crate::error::Result;
use crate::ledger::LedgerHandle;

/// An external swap router (aggregator) that executes an opaque, off-chain
/// produced payload on behalf of `caller`.
///
/// Nothing the implementation reports is trusted; the router measures its
/// own balances before and after the call. The implementation only sees
/// a [`LedgerHandle`] acting as the address it was deployed under.
pub trait ExternalRouter {
    /// The router's own account, the spender callers approve.
    fn address(&self) -> Address;

    /// Executes `call_data` for `caller`, who has approved
    /// [`LedgerHandle::holder`] for the input.
    ///
    /// # Errors
    ///
    /// Any error; callers map it to
    /// [`EngineError::ExternalCallFailed`](crate::error::EngineError::ExternalCallFailed).
    fn execute(
        &mut self,
        ledger: LedgerHandle<'_>,
        caller: Address,
        call_data: &[u8],
    ) -> Result<()>;
}
