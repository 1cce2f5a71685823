//! Fungible token ledgers.
//!
//! | Type | Role |
//! |------|------|
//! | [`TokenLedger`] | Balances, allowances and supply of one token |
//! | [`Ledgers`] | Registry by address; minter checks; events |
//! | [`LedgerHandle`] | A collaborator's view, acting as one account |
//! | [`WrappedNative`] | Value-conserving wrap/unwrap of native currency |

mod handle;
mod registry;
mod token_ledger;
mod wrapped_native;

pub use handle::LedgerHandle;
pub use registry::Ledgers;
pub use token_ledger::TokenLedger;
pub use wrapped_native::WrappedNative;
