//! Initial liquidity for a pool.

use serde::{Deserialize, Serialize};

use super::{Address, Amount};

/// The two tokens of a new pool and the reserve each side starts with.
///
/// Sides are kept in the order given; the pool engine canonicalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairSeed {
    /// First token.
    pub token_a: Address,
    /// Second token.
    pub token_b: Address,
    /// Amount of `token_a` deposited.
    pub amount_a: Amount,
    /// Amount of `token_b` deposited.
    pub amount_b: Amount,
}

impl PairSeed {
    /// Creates a seed description.
    #[must_use]
    pub const fn new(token_a: Address, token_b: Address, amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            token_a,
            token_b,
            amount_a,
            amount_b,
        }
    }

    /// Amount deposited on the side of `token`, `None` if not in the seed.
    #[must_use]
    pub fn amount_of(&self, token: Address) -> Option<Amount> {
        if token == self.token_a {
            Some(self.amount_a)
        } else if token == self.token_b {
            Some(self.amount_b)
        } else {
            None
        }
    }
}
