//! Multi-hop swap routes.

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::{EngineError, Result};

/// One hop of a route: sell `token_in` for `token_out` in their pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteStep {
    /// Token paid into the hop.
    pub token_in: Address,
    /// Token received from the hop.
    pub token_out: Address,
}

/// A validated, non-empty chain of hops where each hop's output token is
/// the next hop's input token.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::{Address, Route};
///
/// let lens = Address::from_low_u64(1);
/// let weth = Address::from_low_u64(2);
/// let usdt = Address::from_low_u64(3);
/// let route = Route::through(&[lens, weth, usdt]).expect("valid path");
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.token_out(), usdt);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route(Vec<RouteStep>);

impl Route {
    /// Validates and wraps a sequence of hops.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRoute`] if the sequence is empty, a
    /// hop trades a token for itself, or two consecutive hops do not
    /// connect.
    pub fn new(steps: Vec<RouteStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(EngineError::InvalidRoute("route has no hops"));
        }
        if steps.iter().any(|s| s.token_in == s.token_out) {
            return Err(EngineError::InvalidRoute("hop input equals hop output"));
        }
        if steps.windows(2).any(|w| w[0].token_out != w[1].token_in) {
            return Err(EngineError::InvalidRoute("consecutive hops do not connect"));
        }
        Ok(Self(steps))
    }

    /// Builds a route from a token path `[t0, t1, ..., tn]`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRoute`] for paths shorter than two
    /// tokens or with a repeated adjacent token.
    pub fn through(path: &[Address]) -> Result<Self> {
        let steps = path
            .windows(2)
            .map(|w| RouteStep {
                token_in: w[0],
                token_out: w[1],
            })
            .collect();
        Self::new(steps)
    }

    /// The hops in execution order.
    #[must_use]
    pub fn steps(&self) -> &[RouteStep] {
        &self.0
    }

    /// Number of hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token paid into the first hop.
    #[must_use]
    pub fn token_in(&self) -> Address {
        self.0[0].token_in
    }

    /// Token received from the last hop.
    #[must_use]
    pub fn token_out(&self) -> Address {
        self.0[self.0.len() - 1].token_out
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let steps = Vec::<RouteStep>::deserialize(deserializer)?;
        Self::new(steps).map_err(serde::de::Error::custom)
    }
}
