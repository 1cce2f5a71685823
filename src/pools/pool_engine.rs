//! The AMM: pools keyed by pair, seeded once, swapped against the ledgers.
//!
//! # Swap flow
//!
//! | Step | Effect |
//! |------|--------|
//! | 1 | Pull `amount_in` from the caller (`transfer_from`, engine as spender) |
//! | 2 | Price the output against current reserves |
//! | 3 | Reject on slippage, then on zero output |
//! | 4 | Write reserves |
//! | 5 | Pay `amount_out` to the caller |
//!
//! Every step happens inside the enclosing engine transaction, so a
//! failure at any step leaves no trace.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::ConstantProductPool;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, FeeTier, PairKey, PairSeed, SwapOutcome, SwapRequest};
use crate::error::{EngineError, Result};
use crate::events::{Event, EventLog};
use crate::ledger::Ledgers;
use crate::traits::FromConfig;

/// All constant-product pools of the deployment.
///
/// The engine's [`address`](Self::address) holds every pool's reserves on
/// the token ledgers, and is the spender callers approve before seeding
/// or swapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEngine {
    address: Address,
    fee_tier: FeeTier,
    pools: BTreeMap<PairKey, ConstantProductPool>,
}

impl FromConfig<PoolConfig> for PoolEngine {
    fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            fee_tier: config.fee_tier(),
            pools: BTreeMap::new(),
        })
    }
}

impl PoolEngine {
    /// Account holding the reserves.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Fee tier applied to new pools.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Seeds the pool for `seed`'s pair with `seed`'s amounts, pulled from
    /// `caller`.
    ///
    /// # Errors
    ///
    /// In order:
    /// - [`EngineError::PoolAlreadySeeded`] if the pair already has a pool.
    /// - [`EngineError::ZeroAmount`] if either amount is zero.
    /// - [`EngineError::InvalidToken`] if the tokens are identical or one is
    ///   the native currency.
    /// - Ledger errors from pulling the amounts.
    pub fn initialize_pair(
        &mut self,
        ledgers: &mut Ledgers,
        events: &mut EventLog,
        caller: Address,
        seed: PairSeed,
    ) -> Result<PairKey> {
        if let Ok(key) = PairKey::new(seed.token_a, seed.token_b) {
            if self.pools.contains_key(&key) {
                return Err(EngineError::PoolAlreadySeeded);
            }
        }
        let pool = ConstantProductPool::seeded(&seed, self.fee_tier, caller)?;
        let key = pool.pair();
        if key.token_a().is_native() || key.token_b().is_native() {
            return Err(EngineError::InvalidToken(
                "native currency must be wrapped before pooling",
            ));
        }

        for (token, amount) in [
            (seed.token_a, seed.amount_a),
            (seed.token_b, seed.amount_b),
        ] {
            ledgers.transfer_from(events, token, self.address, caller, self.address, amount)?;
        }

        info!(
            pair = %key,
            provider = %caller,
            reserve_a = %pool.reserve_a(),
            reserve_b = %pool.reserve_b(),
            "pool seeded"
        );
        events.push(Event::PairInitialized {
            pair: key,
            provider: caller,
            reserve_a: pool.reserve_a(),
            reserve_b: pool.reserve_b(),
        });
        self.pools.insert(key, pool);
        Ok(key)
    }

    /// Prices selling `amount_in` of `token_in` for `token_out`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] for zero input.
    /// - [`EngineError::InvalidToken`] if the tokens are identical.
    /// - [`EngineError::PoolNotSeeded`] if no pool exists for the pair.
    pub fn get_amount_out(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
    ) -> Result<Amount> {
        if amount_in.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        self.seeded_pool(token_in, token_out)?
            .quote(token_in, amount_in)
    }

    /// Sells exactly `request.amount_in` for at least `request.min_out`,
    /// paying the output to `caller`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`], [`EngineError::InvalidToken`],
    ///   [`EngineError::PoolNotSeeded`] as for
    ///   [`get_amount_out`](Self::get_amount_out).
    /// - [`EngineError::InsufficientAllowance`] or
    ///   [`EngineError::InsufficientBalance`] from pulling the input.
    /// - [`EngineError::SlippageExceeded`] if the output is below `min_out`.
    /// - [`EngineError::InsufficientLiquidity`] if the output rounds to zero.
    pub fn swap_exact_input(
        &mut self,
        ledgers: &mut Ledgers,
        events: &mut EventLog,
        caller: Address,
        request: SwapRequest,
    ) -> Result<SwapOutcome> {
        let SwapRequest {
            token_in,
            token_out,
            amount_in,
            min_out,
        } = request;
        if amount_in.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let key = self.seeded_pool(token_in, token_out)?.pair();

        ledgers.transfer_from(events, token_in, self.address, caller, self.address, amount_in)?;

        let pool = self.pools.get_mut(&key).ok_or(EngineError::PoolNotSeeded)?;
        let amount_out = pool.quote(token_in, amount_in)?;
        if amount_out < min_out {
            return Err(EngineError::SlippageExceeded {
                min_out,
                actual: amount_out,
            });
        }
        let outcome = pool.apply_swap(token_in, amount_in, amount_out)?;

        ledgers.transfer(events, token_out, self.address, caller, amount_out)?;

        debug!(
            trader = %caller,
            %token_in,
            %token_out,
            %amount_in,
            %amount_out,
            "swap"
        );
        events.push(Event::Swapped {
            trader: caller,
            token_in,
            token_out,
            amount_in,
            amount_out,
        });
        Ok(outcome)
    }

    /// Reserves of the `(token_a, token_b)` pool, in the order requested.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidToken`] if the tokens are identical.
    /// - [`EngineError::PoolNotSeeded`] if no pool exists for the pair.
    pub fn reserves(&self, token_a: Address, token_b: Address) -> Result<(Amount, Amount)> {
        self.seeded_pool(token_a, token_b)?.reserves_for(token_a)
    }

    /// The pool for `pair`, if seeded.
    #[must_use]
    pub fn pool(&self, pair: &PairKey) -> Option<&ConstantProductPool> {
        self.pools.get(pair)
    }

    /// All seeded pools in pair order.
    pub fn pools(&self) -> impl Iterator<Item = &ConstantProductPool> {
        self.pools.values()
    }

    /// Canonical keys of all seeded pairs.
    pub fn pairs(&self) -> impl Iterator<Item = PairKey> + '_ {
        self.pools.keys().copied()
    }

    fn seeded_pool(&self, x: Address, y: Address) -> Result<&ConstantProductPool> {
        let key = PairKey::new(x, y)?;
        self.pools.get(&key).ok_or(EngineError::PoolNotSeeded)
    }
}
