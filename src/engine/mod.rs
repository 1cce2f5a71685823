//! Transactional engine.
//!
//! [`Engine`] owns every ledger, the AMM, the router, the marketplace and
//! the collaborators, and exposes each externally invoked operation as a
//! method taking the calling account first.
//!
//! # Atomicity
//!
//! Every mutating method runs through `transact`: the committed state is
//! cloned into a draft, the operation runs against the draft, and the draft
//! replaces the committed state only if the operation returned `Ok`. The
//! event log is append-only, so it is moved into the draft instead of
//! cloned and cut back to its previous length on failure. On error
//! balances, reserves, course records and the event log are exactly as
//! they were before the call.
//!
//! ```
//! use lens_engine::prelude::*;
//!
//! let owner = Address::from_low_u64(0xA11CE);
//! let mut engine: Engine = Engine::new(EngineConfig::devnet(owner).expect("config"))
//!     .expect("genesis");
//! let before = engine.events().len();
//! // No pool is seeded yet: the swap fails and leaves no trace.
//! let err = engine.swap_native_for_token(owner, Amount::new(1_000), Amount::ZERO);
//! assert_eq!(err, Err(EngineError::PoolNotSeeded));
//! assert_eq!(engine.events().len(), before);
//! ```

mod state;

use tracing::{debug, warn};

pub(crate) use state::EngineState;

use crate::collaborators::{AggregatorQuote, MockAggregator, MockLendingPool};
use crate::config::{EngineConfig, LendingConfig};
use crate::domain::{
    Address, Amount, BasisPoints, Course, CourseId, PairKey, PairSeed, Route, SwapOutcome,
    SwapRequest,
};
use crate::error::{EngineError, Result};
use crate::events::EventLog;
use crate::indexer::MarketIndex;
use crate::ledger::Ledgers;
use crate::market::CourseMarket;
use crate::pools::{ConstantProductPool, PoolEngine};
use crate::router::{ExternalSwap, Router};
use crate::traits::{ExternalRouter, FromConfig, LendingPool};

/// The value-exchange engine.
///
/// `L` is the lending collaborator and `X` the external router type; both
/// default to the in-crate mocks.
#[derive(Debug, Clone)]
pub struct Engine<L = MockLendingPool, X = MockAggregator> {
    config: EngineConfig,
    state: EngineState<L, X>,
}

impl<L, X> Engine<L, X>
where
    L: LendingPool + FromConfig<LendingConfig> + Clone,
    X: ExternalRouter + Clone,
{
    /// Builds the engine described by `config`, deploying the lending pool
    /// from its own config section.
    ///
    /// # Errors
    ///
    /// - Any [`EngineConfig::validate`] failure.
    /// - Ledger errors while crediting genesis allocations.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let lending = L::from_config(config.lending())?;
        Self::with_lending(config, lending)
    }
}

impl<L, X> Engine<L, X>
where
    L: LendingPool + Clone,
    X: ExternalRouter + Clone,
{
    /// Builds the engine with an already constructed lending pool.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if `lending` does not match
    ///   `config`'s lending section.
    /// - As for [`new`](Self::new).
    pub fn with_lending(config: EngineConfig, lending: L) -> Result<Self> {
        let state = EngineState::genesis(&config, lending)?;
        Ok(Self { config, state })
    }

    /// Deploys an external router. It still has to be allowlisted with
    /// [`set_external_router_approval`](Self::set_external_router_approval)
    /// before the router will call it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if its address is the
    /// native key, a token, a token's minter, a contract, or already
    /// deployed.
    pub fn register_aggregator(&mut self, aggregator: X) -> Result<()> {
        let address = aggregator.address();
        let taken = address.is_native()
            || self.state.ledgers.ledger(address).is_ok()
            || self.state.ledgers.is_minter(address)
            || self.state.aggregators.contains_key(&address)
            || [
                self.state.pools.address(),
                self.state.router.address(),
                self.state.market.address(),
                self.state.lending.address(),
            ]
            .contains(&address);
        if taken {
            return Err(EngineError::InvalidConfiguration(
                "aggregator address already in use",
            ));
        }
        self.state.aggregators.insert(address, aggregator);
        Ok(())
    }

    /// Runs `f` against a draft of the state. The event log is moved into
    /// the draft rather than cloned; a failed draft hands it back truncated
    /// to its length before the call.
    fn transact<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut EngineState<L, X>) -> Result<T>,
    ) -> Result<T> {
        let log = std::mem::take(&mut self.state.events);
        let mark = log.len();
        let mut draft = self.state.clone();
        draft.events = log;
        match f(&mut draft) {
            Ok(value) => {
                debug!(op, events = draft.events.len() - mark, "committed");
                self.state = draft;
                Ok(value)
            }
            Err(e) => {
                let mut log = draft.events;
                log.truncate(mark);
                self.state.events = log;
                warn!(op, error = %e, "rolled back");
                Err(e)
            }
        }
    }

    // -- Ledger --------------------------------------------------------------

    /// Mints `token` to `to`; `caller` must be its minter.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::mint`].
    pub fn mint(
        &mut self,
        caller: Address,
        token: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("mint", |s| s.ledgers.mint(&mut s.events, caller, token, to, amount))
    }

    /// Burns `from`'s `token`; `caller` must be its minter.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::burn`].
    pub fn burn(
        &mut self,
        caller: Address,
        token: Address,
        from: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("burn", |s| s.ledgers.burn(&mut s.events, caller, token, from, amount))
    }

    /// Moves the caller's own tokens.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::transfer`].
    pub fn transfer(
        &mut self,
        caller: Address,
        token: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("transfer", |s| {
            s.ledgers.transfer(&mut s.events, token, caller, to, amount)
        })
    }

    /// Moves `owner`'s tokens with the caller as spender.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::transfer_from`].
    pub fn transfer_from(
        &mut self,
        caller: Address,
        token: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("transfer_from", |s| {
            s.ledgers
                .transfer_from(&mut s.events, token, caller, owner, to, amount)
        })
    }

    /// Sets `spender`'s allowance over the caller's `token`, replacing any
    /// previous allowance.
    ///
    /// # Errors
    ///
    /// See [`Ledgers::approve`].
    pub fn approve(
        &mut self,
        caller: Address,
        token: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("approve", |s| {
            s.ledgers.approve(&mut s.events, token, caller, spender, amount)
        })
    }

    /// Wraps the caller's native currency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if the caller holds less.
    pub fn wrap(&mut self, caller: Address, amount: Amount) -> Result<()> {
        self.transact("wrap", |s| {
            s.router
                .wrapped_native()
                .wrap(&mut s.ledgers, &mut s.events, caller, caller, amount)
        })
    }

    /// Unwraps the caller's wrapped native tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if the caller holds less.
    pub fn unwrap(&mut self, caller: Address, amount: Amount) -> Result<()> {
        self.transact("unwrap", |s| {
            s.router
                .wrapped_native()
                .unwrap(&mut s.ledgers, &mut s.events, caller, amount)
        })
    }

    /// Balance of `owner` on `token`'s ledger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn balance_of(&self, token: Address, owner: Address) -> Result<Amount> {
        self.state.ledgers.balance_of(token, owner)
    }

    /// Remaining allowance of `spender` over `owner`'s `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount> {
        self.state.ledgers.allowance(token, owner, spender)
    }

    /// Total supply of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] for unregistered tokens.
    pub fn total_supply(&self, token: Address) -> Result<Amount> {
        self.state.ledgers.total_supply(token)
    }

    // -- AMM -----------------------------------------------------------------

    /// Seeds a pool with liquidity pulled from the caller.
    ///
    /// # Errors
    ///
    /// See [`PoolEngine::initialize_pair`].
    pub fn initialize_pair(&mut self, caller: Address, seed: PairSeed) -> Result<PairKey> {
        self.transact("initialize_pair", |s| {
            s.pools
                .initialize_pair(&mut s.ledgers, &mut s.events, caller, seed)
        })
    }

    /// Prices a single-pool swap.
    ///
    /// # Errors
    ///
    /// See [`PoolEngine::get_amount_out`].
    pub fn get_amount_out(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
    ) -> Result<Amount> {
        self.state.pools.get_amount_out(token_in, token_out, amount_in)
    }

    /// Executes a single-pool swap for the caller.
    ///
    /// # Errors
    ///
    /// See [`PoolEngine::swap_exact_input`].
    pub fn swap_exact_input(
        &mut self,
        caller: Address,
        request: SwapRequest,
    ) -> Result<SwapOutcome> {
        self.transact("swap_exact_input", |s| {
            s.pools
                .swap_exact_input(&mut s.ledgers, &mut s.events, caller, request)
        })
    }

    /// Reserves of the `(token_a, token_b)` pool in the order requested.
    ///
    /// # Errors
    ///
    /// See [`PoolEngine::reserves`].
    pub fn reserves(&self, token_a: Address, token_b: Address) -> Result<(Amount, Amount)> {
        self.state.pools.reserves(token_a, token_b)
    }

    /// The pool for `pair`, if seeded.
    #[must_use]
    pub fn pool(&self, pair: &PairKey) -> Option<&ConstantProductPool> {
        self.state.pools.pool(pair)
    }

    /// All seeded pairs.
    pub fn pairs(&self) -> impl Iterator<Item = PairKey> + '_ {
        self.state.pools.pairs()
    }

    // -- Router --------------------------------------------------------------

    /// See [`Router::swap_native_for_token`]; `value` is the attached native
    /// amount.
    ///
    /// # Errors
    ///
    /// See [`Router::swap_native_for_token`].
    pub fn swap_native_for_token(
        &mut self,
        caller: Address,
        value: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        self.transact("swap_native_for_token", |s| {
            let (router, mut cx) = s.route();
            router.swap_native_for_token(&mut cx, caller, value, min_out)
        })
    }

    /// See [`Router::swap_token_to_stable`].
    ///
    /// # Errors
    ///
    /// See [`Router::swap_token_to_stable`].
    pub fn swap_token_to_stable(
        &mut self,
        caller: Address,
        amount_in: Amount,
        min_out: Amount,
        deposit: bool,
    ) -> Result<Amount> {
        self.transact("swap_token_to_stable", |s| {
            let (router, mut cx) = s.route();
            router.swap_token_to_stable(&mut cx, caller, amount_in, min_out, deposit)
        })
    }

    /// See [`Router::deposit_from_platform_token`].
    ///
    /// # Errors
    ///
    /// See [`Router::deposit_from_platform_token`].
    pub fn deposit_from_platform_token(
        &mut self,
        caller: Address,
        amount_in: Amount,
        min_mid: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        self.transact("deposit_from_platform_token", |s| {
            let (router, mut cx) = s.route();
            router.deposit_from_platform_token(&mut cx, caller, amount_in, min_mid, min_out)
        })
    }

    /// See [`Router::swap_along_route`].
    ///
    /// # Errors
    ///
    /// See [`Router::swap_along_route`].
    pub fn swap_along_route(
        &mut self,
        caller: Address,
        route: &Route,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        self.transact("swap_along_route", |s| {
            let (router, mut cx) = s.route();
            router.swap_along_route(&mut cx, caller, route, amount_in, min_out)
        })
    }

    /// See [`Router::swap_externally_quoted`].
    ///
    /// # Errors
    ///
    /// See [`Router::swap_externally_quoted`].
    pub fn swap_externally_quoted(
        &mut self,
        caller: Address,
        swap: &ExternalSwap,
    ) -> Result<Amount> {
        self.transact("swap_externally_quoted", |s| {
            let (router, mut cx) = s.route();
            router.swap_externally_quoted(&mut cx, caller, swap)
        })
    }

    /// See [`Router::swap_with_quote`].
    ///
    /// # Errors
    ///
    /// See [`Router::swap_with_quote`].
    pub fn swap_with_quote(
        &mut self,
        caller: Address,
        quote: &AggregatorQuote,
        amount_in: Amount,
        min_out: Amount,
        use_lending: bool,
    ) -> Result<Amount> {
        self.transact("swap_with_quote", |s| {
            let (router, mut cx) = s.route();
            router.swap_with_quote(&mut cx, caller, quote, amount_in, min_out, use_lending)
        })
    }

    /// See [`Router::withdraw_from_lending`].
    ///
    /// # Errors
    ///
    /// See [`Router::withdraw_from_lending`].
    pub fn withdraw_from_lending(&mut self, caller: Address, amount: Amount) -> Result<Amount> {
        self.transact("withdraw_from_lending", |s| {
            let (router, mut cx) = s.route();
            router.withdraw_from_lending(&mut cx, caller, amount)
        })
    }

    /// See [`Router::set_external_router_approval`].
    ///
    /// # Errors
    ///
    /// See [`Router::set_external_router_approval`].
    pub fn set_external_router_approval(
        &mut self,
        caller: Address,
        router: Address,
        approved: bool,
    ) -> Result<()> {
        self.transact("set_external_router_approval", |s| {
            s.router
                .set_external_router_approval(&mut s.events, caller, router, approved)
        })
    }

    /// Receipt tokens `user` holds in the lending pool.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] if the receipt ledger is
    /// missing.
    pub fn receipt_balance(&self, user: Address) -> Result<Amount> {
        self.state
            .router
            .receipt_balance(&self.state.ledgers, user)
    }

    // -- Marketplace ---------------------------------------------------------

    /// See [`CourseMarket::create_course`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::create_course`].
    pub fn create_course(
        &mut self,
        caller: Address,
        price: Amount,
        metadata_uri: impl Into<String>,
    ) -> Result<CourseId> {
        let metadata_uri = metadata_uri.into();
        self.transact("create_course", |s| {
            s.market
                .create_course(&mut s.events, caller, price, metadata_uri)
        })
    }

    /// See [`CourseMarket::update_course`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::update_course`].
    pub fn update_course(
        &mut self,
        caller: Address,
        id: CourseId,
        price: Amount,
        metadata_uri: impl Into<String>,
    ) -> Result<()> {
        let metadata_uri = metadata_uri.into();
        self.transact("update_course", |s| {
            s.market
                .update_course(&mut s.events, caller, id, price, metadata_uri)
        })
    }

    /// See [`CourseMarket::deactivate_course`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::deactivate_course`].
    pub fn deactivate_course(&mut self, caller: Address, id: CourseId) -> Result<()> {
        self.transact("deactivate_course", |s| {
            s.market.deactivate_course(&mut s.events, caller, id)
        })
    }

    /// See [`CourseMarket::buy`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::buy`].
    pub fn buy(&mut self, caller: Address, id: CourseId) -> Result<()> {
        self.transact("buy", |s| {
            s.market.buy(&mut s.ledgers, &mut s.events, caller, id)
        })
    }

    /// See [`CourseMarket::set_fee_bps`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::set_fee_bps`].
    pub fn set_fee_bps(&mut self, caller: Address, fee_bps: BasisPoints) -> Result<()> {
        self.transact("set_fee_bps", |s| {
            s.market.set_fee_bps(&mut s.events, caller, fee_bps)
        })
    }

    /// See [`CourseMarket::set_fee_recipient`].
    ///
    /// # Errors
    ///
    /// See [`CourseMarket::set_fee_recipient`].
    pub fn set_fee_recipient(&mut self, caller: Address, recipient: Address) -> Result<()> {
        self.transact("set_fee_recipient", |s| {
            s.market.set_fee_recipient(&mut s.events, caller, recipient)
        })
    }

    /// Whether `account` bought course `id`.
    #[must_use]
    pub fn has_access(&self, id: CourseId, account: Address) -> bool {
        self.state.market.has_access(id, account)
    }

    /// The course record, if created.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.state.market.course(id)
    }

    /// Most recently assigned course identifier.
    #[must_use]
    pub fn last_course_id(&self) -> CourseId {
        self.state.market.last_course_id()
    }

    /// Sales of course `id`.
    #[must_use]
    pub fn sold_count(&self, id: CourseId) -> u64 {
        self.state.market.sold_count(id)
    }

    /// Courses listed by `author`.
    pub fn courses_by(&self, author: Address) -> impl Iterator<Item = &Course> {
        self.state.market.courses_by(author)
    }

    // -- Inspection ----------------------------------------------------------

    /// The deployment this engine was built from.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Committed events, oldest first.
    #[must_use]
    pub const fn events(&self) -> &EventLog {
        &self.state.events
    }

    /// Marketplace index rebuilt from the committed events.
    #[must_use]
    pub fn index(&self) -> MarketIndex {
        MarketIndex::from_events(self.state.events.iter())
    }

    /// All token ledgers.
    #[must_use]
    pub const fn ledgers(&self) -> &Ledgers {
        &self.state.ledgers
    }

    /// The AMM.
    #[must_use]
    pub const fn pools(&self) -> &PoolEngine {
        &self.state.pools
    }

    /// The router.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.state.router
    }

    /// The marketplace.
    #[must_use]
    pub const fn market(&self) -> &CourseMarket {
        &self.state.market
    }

    /// The lending collaborator.
    #[must_use]
    pub const fn lending(&self) -> &L {
        &self.state.lending
    }

    /// A deployed external router.
    #[must_use]
    pub fn aggregator(&self, address: Address) -> Option<&X> {
        self.state.aggregators.get(&address)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{devnet, TokenConfig};
    use crate::domain::Decimals;
    use crate::events::Event;

    const OWNER: Address = Address::from_low_u64(0xA11CE);
    const BOB: Address = Address::from_low_u64(0xB0B);

    fn engine() -> Engine {
        let Ok(config) = EngineConfig::devnet(OWNER) else {
            panic!("devnet config");
        };
        let Ok(engine) = Engine::new(config) else {
            panic!("genesis");
        };
        engine
    }

    fn units(whole: u128) -> Amount {
        let Some(a) = Amount::units(whole, 18) else {
            panic!("units");
        };
        a
    }

    // -- Genesis -------------------------------------------------------------

    #[test]
    fn genesis_credits_allocations() {
        let e = engine();
        assert_eq!(e.balance_of(devnet::LENS, OWNER), Ok(units(1_000_000)));
        assert_eq!(e.balance_of(Address::NATIVE, OWNER), Ok(units(20_000)));
        assert_eq!(e.total_supply(devnet::WETH), Ok(Amount::ZERO));
        assert_eq!(e.total_supply(devnet::A_USDT), Ok(Amount::ZERO));
        assert_eq!(
            e.balance_of(Address::from_low_u64(77), OWNER),
            Err(EngineError::UnknownToken)
        );
        assert!(e.events().iter().all(|ev| matches!(ev, Event::Transfer { from: None, .. })));
    }

    #[test]
    fn mismatched_lending_pool_rejected() {
        let Ok(config) = EngineConfig::devnet(OWNER) else {
            panic!("devnet config");
        };
        let Ok(receipt) = TokenConfig::new(
            Address::from_low_u64(0x3001),
            "aX",
            Decimals::STABLE,
            devnet::LENDING,
        ) else {
            panic!("receipt config");
        };
        let Ok(lending) = LendingConfig::new(devnet::LENDING, devnet::USDT, receipt) else {
            panic!("lending config");
        };
        let Ok(other) = MockLendingPool::from_config(&lending) else {
            panic!("lending pool");
        };
        assert!(matches!(
            Engine::<MockLendingPool, MockAggregator>::with_lending(config, other),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    // -- Transactions --------------------------------------------------------

    #[test]
    fn failed_operation_leaves_no_trace() {
        let mut e = engine();
        let before = e.clone();
        assert_eq!(
            e.transfer(BOB, devnet::LENS, OWNER, Amount::new(1)),
            Err(EngineError::InsufficientBalance)
        );
        assert_eq!(e.events(), before.events());
        assert_eq!(e.ledgers(), before.ledgers());
    }

    #[test]
    fn committed_operation_appends_events() {
        let mut e = engine();
        let before = e.events().len();
        let Ok(()) = e.transfer(OWNER, devnet::LENS, BOB, Amount::new(5)) else {
            panic!("transfer");
        };
        assert_eq!(e.events().len(), before + 1);
        assert_eq!(e.balance_of(devnet::LENS, BOB), Ok(Amount::new(5)));
    }

    #[test]
    fn rollback_cuts_events_emitted_before_the_failure() {
        let mut e = engine();
        let before = e.events().as_slice().to_vec();
        // Wrapping succeeds and logs before the unseeded hop fails.
        assert_eq!(
            e.swap_native_for_token(OWNER, units(1), Amount::ZERO),
            Err(EngineError::PoolNotSeeded)
        );
        assert_eq!(e.events().as_slice(), before.as_slice());
        assert_eq!(e.balance_of(Address::NATIVE, OWNER), Ok(units(20_000)));

        let Ok(()) = e.transfer(OWNER, devnet::LENS, BOB, Amount::new(5)) else {
            panic!("transfer");
        };
        assert_eq!(e.events().since(before.len()).len(), 1);
        assert_eq!(&e.events().as_slice()[..before.len()], before.as_slice());
    }

    #[test]
    fn wrap_then_unwrap() {
        let mut e = engine();
        let Ok(()) = e.wrap(OWNER, units(3)) else {
            panic!("wrap");
        };
        assert_eq!(e.balance_of(devnet::WETH, OWNER), Ok(units(3)));
        assert_eq!(e.balance_of(Address::NATIVE, devnet::WETH), Ok(units(3)));
        let Ok(()) = e.unwrap(OWNER, units(1)) else {
            panic!("unwrap");
        };
        assert_eq!(e.total_supply(devnet::WETH), Ok(units(2)));
        assert_eq!(e.unwrap(OWNER, units(5)), Err(EngineError::InsufficientBalance));
        assert_eq!(e.total_supply(devnet::WETH), Ok(units(2)));
    }

    #[test]
    fn aggregator_addresses_must_be_free() {
        let mut e = engine();
        assert!(matches!(
            e.register_aggregator(MockAggregator::new(devnet::ROUTER)),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            e.register_aggregator(MockAggregator::new(devnet::LENS)),
            Err(EngineError::InvalidConfiguration(_))
        ));
        // The owner mints LENS and USDT; a collaborator there could mint.
        assert!(matches!(
            e.register_aggregator(MockAggregator::new(OWNER)),
            Err(EngineError::InvalidConfiguration(_))
        ));
        let agg = Address::from_low_u64(0x5001);
        let Ok(()) = e.register_aggregator(MockAggregator::new(agg)) else {
            panic!("register");
        };
        assert!(e.aggregator(agg).is_some());
        assert!(matches!(
            e.register_aggregator(MockAggregator::new(agg)),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn minting_is_restricted() {
        let mut e = engine();
        assert_eq!(
            e.mint(BOB, devnet::LENS, BOB, Amount::new(1)),
            Err(EngineError::Unauthorized)
        );
        let Ok(()) = e.mint(OWNER, devnet::LENS, BOB, Amount::new(1)) else {
            panic!("mint");
        };
        assert_eq!(
            e.burn(BOB, devnet::LENS, BOB, Amount::new(1)),
            Err(EngineError::Unauthorized)
        );
    }
}
