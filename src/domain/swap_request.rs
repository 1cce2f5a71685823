//! Parameters of an exact-input swap.

use serde::{Deserialize, Serialize};

use super::{Address, Amount};

/// Sell exactly `amount_in` of `token_in` for at least `min_out` of
/// `token_out`.
///
/// Construction does not validate: the pool engine checks the request in a
/// fixed order so that callers see the same error for the same mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Token sold.
    pub token_in: Address,
    /// Token bought.
    pub token_out: Address,
    /// Exact input amount.
    pub amount_in: Amount,
    /// Minimum acceptable output.
    pub min_out: Amount,
}

impl SwapRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(token_in: Address, token_out: Address, amount_in: Amount, min_out: Amount) -> Self {
        Self {
            token_in,
            token_out,
            amount_in,
            min_out,
        }
    }

    /// Same request with no output bound, used for quotes and inner hops.
    #[must_use]
    pub const fn unbounded(token_in: Address, token_out: Address, amount_in: Amount) -> Self {
        Self::new(token_in, token_out, amount_in, Amount::ZERO)
    }
}
