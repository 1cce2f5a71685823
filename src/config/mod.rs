//! Validated deployment blueprints.
//!
//! Every blueprint has private fields, a `new(...) -> Result` constructor
//! that calls `validate()`, and serde support so deployments can be
//! described in JSON. [`EngineConfig`] ties them together.

mod engine;
mod lending;
mod market;
mod pool;
mod router;
mod token;

pub use engine::{devnet, EngineConfig};
pub use lending::LendingConfig;
pub use market::MarketConfig;
pub use pool::PoolConfig;
pub use router::RouterConfig;
pub use token::{Allocation, TokenConfig};
