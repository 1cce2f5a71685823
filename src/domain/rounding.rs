//! Rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Direction in which an inexact integer quotient is rounded.
///
/// Value leaving the engine (swap outputs, author payouts) is always
/// rounded [`Down`](Rounding::Down); only quantities charged to a caller
/// may be rounded [`Up`](Rounding::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Rounds the quotient `q` of a division that left remainder `r`.
    ///
    /// Returns `None` only when rounding up would overflow.
    #[must_use]
    pub const fn settle(&self, q: u128, r: u128) -> Option<u128> {
        match self {
            Self::Down => Some(q),
            Self::Up if r == 0 => Some(q),
            Self::Up => q.checked_add(1),
        }
    }
}
