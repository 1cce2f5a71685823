//! The engine's state root.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{Address, Token};
use crate::error::{EngineError, Result};
use crate::events::EventLog;
use crate::ledger::Ledgers;
use crate::market::CourseMarket;
use crate::pools::PoolEngine;
use crate::router::{RouteContext, Router};
use crate::traits::{FromConfig, LendingPool};

/// Everything a transaction may touch. Cloned into a draft at the start of
/// every transaction and swapped back in on success.
#[derive(Debug, Clone)]
pub(crate) struct EngineState<L, X> {
    pub(crate) ledgers: Ledgers,
    pub(crate) pools: PoolEngine,
    pub(crate) router: Router,
    pub(crate) market: CourseMarket,
    pub(crate) lending: L,
    pub(crate) aggregators: BTreeMap<Address, X>,
    pub(crate) events: EventLog,
}

impl<L: LendingPool, X> EngineState<L, X> {
    /// Registers every ledger, credits genesis allocations and deploys the
    /// contracts described by `config`.
    pub(crate) fn genesis(config: &EngineConfig, lending: L) -> Result<Self> {
        config.validate()?;
        let expected = config.lending();
        if lending.address() != expected.address()
            || lending.asset() != expected.asset()
            || lending.receipt_token() != expected.receipt().address()
        {
            return Err(EngineError::InvalidConfiguration(
                "lending pool does not match its config",
            ));
        }

        let mut ledgers = Ledgers::new();
        let mut events = EventLog::new();

        let issuer = config.native_issuer();
        ledgers.register(Token::native(), issuer)?;
        for grant in config.native_genesis() {
            ledgers.mint(&mut events, issuer, Address::NATIVE, grant.holder, grant.amount)?;
        }
        for token in [
            config.platform(),
            config.wrapped_native(),
            config.stable(),
            expected.receipt(),
        ] {
            ledgers.register(token.token()?, token.minter())?;
            for grant in token.genesis() {
                ledgers.mint(
                    &mut events,
                    token.minter(),
                    token.address(),
                    grant.holder,
                    grant.amount,
                )?;
            }
        }

        let state = Self {
            ledgers,
            pools: PoolEngine::from_config(config.pool())?,
            router: Router::from_config(config)?,
            market: CourseMarket::from_config(config.market())?,
            lending,
            aggregators: BTreeMap::new(),
            events,
        };
        info!(
            tokens = state.ledgers.tokens().count(),
            amm = %state.pools.address(),
            router = %state.router.address(),
            market = %state.market.address(),
            "engine genesis"
        );
        Ok(state)
    }
}

impl<L, X> EngineState<L, X> {
    /// Splits the state into the router and the context it routes over.
    pub(crate) fn route(&mut self) -> (&Router, RouteContext<'_, L, X>) {
        (
            &self.router,
            RouteContext {
                ledgers: &mut self.ledgers,
                pools: &mut self.pools,
                lending: &mut self.lending,
                aggregators: &mut self.aggregators,
                events: &mut self.events,
            },
        )
    }
}
