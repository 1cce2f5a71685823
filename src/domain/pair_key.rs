//! Canonical unordered pair of token addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::{EngineError, Result};

/// Key of a liquidity pool: two distinct token addresses sorted ascending,
/// so that `(A, B)` and `(B, A)` resolve to the same pool.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::{Address, PairKey};
///
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
/// assert_eq!(PairKey::new(a, b).ok(), PairKey::new(b, a).ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    token_a: Address,
    token_b: Address,
}

impl PairKey {
    /// Creates a canonically ordered key.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if both addresses are equal.
    pub fn new(x: Address, y: Address) -> Result<Self> {
        if x == y {
            return Err(EngineError::InvalidToken(
                "pair requires two distinct tokens",
            ));
        }
        let (token_a, token_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { token_a, token_b })
    }

    /// The lower address.
    #[must_use]
    pub const fn token_a(&self) -> Address {
        self.token_a
    }

    /// The higher address.
    #[must_use]
    pub const fn token_b(&self) -> Address {
        self.token_b
    }

    /// Returns `true` if `token` is one side of the pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token_a == token || self.token_b == token
    }

    /// `true` if `token_in` is the lower-address side.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if `token_in` is not in the pair.
    pub fn is_a_side(&self, token_in: Address) -> Result<bool> {
        if token_in == self.token_a {
            Ok(true)
        } else if token_in == self.token_b {
            Ok(false)
        } else {
            Err(EngineError::InvalidToken("token is not part of this pair"))
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn order_independent() {
        let Ok(k1) = PairKey::new(addr(9), addr(4)) else {
            panic!("expected Ok");
        };
        let Ok(k2) = PairKey::new(addr(4), addr(9)) else {
            panic!("expected Ok");
        };
        assert_eq!(k1, k2);
        assert_eq!(k1.token_a(), addr(4));
        assert_eq!(k1.token_b(), addr(9));
    }

    #[test]
    fn identical_tokens_rejected() {
        assert!(matches!(
            PairKey::new(addr(1), addr(1)),
            Err(EngineError::InvalidToken(_))
        ));
    }

    #[test]
    fn side_lookup() {
        let Ok(k) = PairKey::new(addr(2), addr(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(k.is_a_side(addr(1)), Ok(true));
        assert_eq!(k.is_a_side(addr(2)), Ok(false));
        assert!(k.is_a_side(addr(3)).is_err());
        assert!(k.contains(addr(2)));
        assert!(!k.contains(addr(3)));
    }
}
