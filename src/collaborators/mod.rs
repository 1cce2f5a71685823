//! In-crate implementations of the external collaborators.
//!
//! | Type | Implements | Stands in for |
//! |------|------------|---------------|
//! | [`MockLendingPool`] | [`LendingPool`](crate::traits::LendingPool) | a lending protocol minting 1:1 receipts |
//! | [`MockAggregator`] | [`ExternalRouter`](crate::traits::ExternalRouter) | an off-chain quoted swap aggregator |
//!
//! [`AggregatorQuote`] is the quote-service response the router's quoted
//! entry point consumes.

mod mock_aggregator;
mod mock_lending;
mod quote;

pub use mock_aggregator::{AggregatorOrder, MockAggregator};
pub use mock_lending::MockLendingPool;
pub use quote::AggregatorQuote;
