//! Construction of components from their blueprints.
//!
//! [`FromConfig`] gives every configurable component the same entry
//! point. Implementations validate the blueprint again, so a component
//! built through this trait is always in a valid initial state:
//!
//! ```text
//! PoolEngine::from_config(&PoolConfig)
//! CourseMarket::from_config(&MarketConfig)
//! MockLendingPool::from_config(&LendingConfig)
//! ```
//!
//! There is no blanket implementation; each pairing is written out.

use crate::error::Result;

/// Builds `Self` from a blueprint of type `C`.
pub trait FromConfig<C>: Sized {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns the blueprint's validation error, typically
    /// [`EngineError::InvalidConfiguration`](crate::error::EngineError::InvalidConfiguration)
    /// or [`EngineError::InvalidFee`](crate::error::EngineError::InvalidFee).
    fn from_config(config: &C) -> Result<Self>;
}
