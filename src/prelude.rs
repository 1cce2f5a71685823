//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use lens_engine::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, Course, CourseId, CourseStatus, Decimals, FeeTier, PairKey,
    PairSeed, Route, RouteStep, SwapOutcome, SwapRequest, Token,
};

pub use crate::traits::{ExternalRouter, FromConfig, LendingPool};

pub use crate::ledger::LedgerHandle;

pub use crate::math::CheckedArithmetic;

pub use crate::config::{devnet, EngineConfig};

pub use crate::error::{EngineError, Result};

pub use crate::collaborators::{AggregatorOrder, AggregatorQuote, MockAggregator, MockLendingPool};

pub use crate::engine::Engine;
pub use crate::events::{Event, EventLog};
pub use crate::indexer::MarketIndex;
pub use crate::router::ExternalSwap;
