//! Constant-product liquidity pools.
//!
//! | Item | Role |
//! |------|------|
//! | [`amount_out`] | Exact-input pricing in 256-bit precision |
//! | [`ConstantProductPool`] | Reserve state of one seeded pair |
//! | [`PoolEngine`] | Pools keyed by pair; seeding and swaps against the ledgers |

mod constant_product;
mod pool_engine;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::{amount_out, ConstantProductPool};
pub use pool_engine::PoolEngine;
