//! Swap router.
//!
//! The router composes pool swaps into routes, wraps native currency, and
//! bridges route output into the lending pool. It owns no balances between
//! calls: whatever it pulls from a caller is either swapped, deposited or
//! paid back out within the same transaction.
//!
//! | Entry point | Path |
//! |-------------|------|
//! | [`swap_native_for_token`](Router::swap_native_for_token) | native → WETH → LENS |
//! | [`swap_token_to_stable`](Router::swap_token_to_stable) | LENS → WETH → USDT, optional deposit |
//! | [`deposit_from_platform_token`](Router::deposit_from_platform_token) | LENS → WETH → USDT → lending |
//! | [`swap_along_route`](Router::swap_along_route) | any validated [`Route`] |
//! | [`swap_externally_quoted`](Router::swap_externally_quoted) | LENS → aggregator → USDT, optional deposit |
//!
//! Collaborators are untrusted. Each call hands them a [`LedgerHandle`]
//! acting as the address the engine knows them by, so they can only move
//! their own balances and allowances granted to them. After a lending
//! deposit or an aggregator call the router re-reads the ledgers and fails
//! with [`EngineError::ExternalCallFailed`] unless the observed balance
//! changes match the request.

mod external;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

pub use external::ExternalSwap;

use crate::config::EngineConfig;
use crate::domain::{Address, Amount, Route, SwapRequest};
use crate::error::{EngineError, Result};
use crate::events::{Event, EventLog};
use crate::ledger::{LedgerHandle, Ledgers, WrappedNative};
use crate::pools::PoolEngine;
use crate::traits::{FromConfig, LendingPool};

/// Mutable state a routed operation runs against.
///
/// The engine builds one over its draft state for each transaction, so
/// every write made through it is discarded if the operation fails.
#[derive(Debug)]
pub struct RouteContext<'a, L, X> {
    /// All token ledgers.
    pub ledgers: &'a mut Ledgers,
    /// The AMM.
    pub pools: &'a mut PoolEngine,
    /// The lending collaborator.
    pub lending: &'a mut L,
    /// Deployed external routers by address.
    pub aggregators: &'a mut BTreeMap<Address, X>,
    /// Transaction event log.
    pub events: &'a mut EventLog,
}

/// The swap router contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    address: Address,
    owner: Address,
    platform: Address,
    wrapped_native: WrappedNative,
    stable: Address,
    lending_pool: Address,
    receipt_token: Address,
    approved_external: BTreeSet<Address>,
}

impl FromConfig<EngineConfig> for Router {
    fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let router = config.router();
        Ok(Self {
            address: router.address(),
            owner: router.owner(),
            platform: config.platform().address(),
            wrapped_native: WrappedNative::new(config.wrapped_native().address()),
            stable: config.stable().address(),
            lending_pool: config.lending().address(),
            receipt_token: config.lending().receipt().address(),
            approved_external: router.approved_external_routers().iter().copied().collect(),
        })
    }
}

impl Router {
    /// Router account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account allowed to edit the external-router allowlist.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Platform token.
    #[must_use]
    pub const fn platform(&self) -> Address {
        self.platform
    }

    /// Wrapped native token contract.
    #[must_use]
    pub const fn wrapped_native(&self) -> WrappedNative {
        self.wrapped_native
    }

    /// Stable token.
    #[must_use]
    pub const fn stable(&self) -> Address {
        self.stable
    }

    /// Lending pool account the router deposits into.
    #[must_use]
    pub const fn lending_pool(&self) -> Address {
        self.lending_pool
    }

    /// Whether `router` may be used for externally quoted swaps.
    #[must_use]
    pub fn is_external_router_approved(&self, router: Address) -> bool {
        self.approved_external.contains(&router)
    }

    /// Adds `router` to, or removes it from, the external allowlist.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] unless `caller` is the owner.
    /// - [`EngineError::InvalidConfiguration`] for the native key or the
    ///   router itself.
    pub fn set_external_router_approval(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        router: Address,
        approved: bool,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized);
        }
        if router.is_native() || router == self.address {
            return Err(EngineError::InvalidConfiguration(
                "invalid external router",
            ));
        }
        if approved {
            self.approved_external.insert(router);
        } else {
            self.approved_external.remove(&router);
        }
        debug!(%router, approved, "external router approval");
        events.push(Event::ExternalRouterApproval { router, approved });
        Ok(())
    }

    /// Wraps `value` of the caller's native currency and swaps it for the
    /// platform token in one hop. Returns the platform tokens paid to the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `value` is zero.
    /// - [`EngineError::InsufficientBalance`] if the caller holds less
    ///   native currency.
    /// - Pool errors from the hop, including
    ///   [`EngineError::SlippageExceeded`] below `min_out`.
    pub fn swap_native_for_token<L, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        value: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        if value.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let weth = self.wrapped_native.address();
        self.wrapped_native
            .wrap(cx.ledgers, cx.events, caller, self.address, value)?;
        let out = self.hop(cx, weth, self.platform, value, min_out)?;
        cx.ledgers
            .transfer(cx.events, self.platform, self.address, caller, out)?;

        debug!(%caller, native_in = %value, platform_out = %out, "native swapped");
        cx.events.push(Event::NativeSwapped {
            account: caller,
            native_in: value,
            platform_out: out,
        });
        Ok(out)
    }

    /// Sells platform tokens for the stable token through wrapped native.
    /// With `deposit` set the stable output is deposited into the lending
    /// pool for the caller; otherwise it is paid to the caller. Returns the
    /// stable amount.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `amount_in` is zero.
    /// - Ledger errors from pulling the input.
    /// - Pool errors from either hop, including
    ///   [`EngineError::SlippageExceeded`] below `min_out` on the last.
    /// - [`EngineError::ExternalCallFailed`] if the deposit fails
    ///   verification.
    pub fn swap_token_to_stable<L: LendingPool, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        amount_in: Amount,
        min_out: Amount,
        deposit: bool,
    ) -> Result<Amount> {
        let route = self.stable_route()?;
        let out = self.run_route(cx, caller, &route, amount_in, &[Amount::ZERO, min_out])?;
        self.settle_stable(cx, caller, out, deposit)?;
        Ok(out)
    }

    /// Like [`swap_token_to_stable`](Self::swap_token_to_stable) with a
    /// bound on the intermediate wrapped-native output, always depositing.
    ///
    /// # Errors
    ///
    /// As for [`swap_token_to_stable`](Self::swap_token_to_stable), with
    /// [`EngineError::SlippageExceeded`] also raised below `min_mid` on the
    /// first hop.
    pub fn deposit_from_platform_token<L: LendingPool, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        amount_in: Amount,
        min_mid: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        let route = self.stable_route()?;
        let out = self.run_route(cx, caller, &route, amount_in, &[min_mid, min_out])?;
        self.deposit_for(cx, caller, out)?;
        Ok(out)
    }

    /// Swaps along an arbitrary route and pays the final output to the
    /// caller. Only the last hop is bounded, by `min_out`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `amount_in` is zero.
    /// - Ledger errors from pulling the input.
    /// - Pool errors from any hop.
    pub fn swap_along_route<L, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        route: &Route,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        let mut bounds = vec![Amount::ZERO; route.len()];
        if let Some(last) = bounds.last_mut() {
            *last = min_out;
        }
        let out = self.run_route(cx, caller, route, amount_in, &bounds)?;
        cx.ledgers
            .transfer(cx.events, route.token_out(), self.address, caller, out)?;
        Ok(out)
    }

    /// Receipt tokens `user` holds in the lending pool.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownToken`] if the receipt token has no
    /// ledger.
    pub fn receipt_balance(&self, ledgers: &Ledgers, user: Address) -> Result<Amount> {
        ledgers.balance_of(self.receipt_token, user)
    }

    /// Redeems `amount` of the caller's receipt tokens for the stable token.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `amount` is zero.
    /// - [`EngineError::ExternalCallFailed`] if the lending pool reverts.
    pub fn withdraw_from_lending<L: LendingPool, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        amount: Amount,
    ) -> Result<Amount> {
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let handle = LedgerHandle::new(cx.ledgers, cx.events, self.lending_pool);
        let released = cx
            .lending
            .withdraw(handle, caller, self.stable, amount, caller)
            .map_err(|e| {
                warn!(%caller, %amount, error = %e, "lending withdraw reverted");
                EngineError::ExternalCallFailed("lending withdraw reverted")
            })?;
        cx.events.push(Event::Withdrawn {
            user: caller,
            asset: self.stable,
            amount: released,
        });
        Ok(released)
    }

    fn stable_route(&self) -> Result<Route> {
        Route::through(&[self.platform, self.wrapped_native.address(), self.stable])
    }

    /// Pulls `amount_in` of the route's input from `caller` and runs every
    /// hop with the router as trader. `bounds[i]` is hop `i`'s minimum.
    /// The output stays with the router.
    fn run_route<L, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        route: &Route,
        amount_in: Amount,
        bounds: &[Amount],
    ) -> Result<Amount> {
        if amount_in.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        cx.ledgers.transfer_from(
            cx.events,
            route.token_in(),
            self.address,
            caller,
            self.address,
            amount_in,
        )?;

        let mut amount = amount_in;
        for (step, min_out) in route.steps().iter().zip(bounds) {
            amount = self.hop(cx, step.token_in, step.token_out, amount, *min_out)?;
        }

        let hops = u32::try_from(route.len())
            .map_err(|_| EngineError::InvalidRoute("too many hops"))?;
        debug!(
            %caller,
            token_in = %route.token_in(),
            token_out = %route.token_out(),
            %amount_in,
            amount_out = %amount,
            hops,
            "route executed"
        );
        cx.events.push(Event::RouteExecuted {
            account: caller,
            token_in: route.token_in(),
            token_out: route.token_out(),
            amount_in,
            amount_out: amount,
            hops,
        });
        Ok(amount)
    }

    /// One pool swap with the router as trader.
    fn hop<L, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        let amm = cx.pools.address();
        cx.ledgers
            .approve(cx.events, token_in, self.address, amm, amount_in)?;
        let outcome = cx.pools.swap_exact_input(
            cx.ledgers,
            cx.events,
            self.address,
            SwapRequest::new(token_in, token_out, amount_in, min_out),
        )?;
        Ok(outcome.amount_out())
    }

    fn settle_stable<L: LendingPool, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        user: Address,
        amount: Amount,
        deposit: bool,
    ) -> Result<()> {
        if deposit {
            self.deposit_for(cx, user, amount)
        } else {
            cx.ledgers
                .transfer(cx.events, self.stable, self.address, user, amount)
        }
    }

    /// Deposits `amount` of the router's stable tokens for `user` and
    /// verifies the resulting balance changes.
    fn deposit_for<L: LendingPool, X>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        user: Address,
        amount: Amount,
    ) -> Result<()> {
        let pool = self.lending_pool;
        let receipt = self.receipt_token;
        let held_before = cx.ledgers.balance_of(self.stable, self.address)?;
        let receipts_before = cx.ledgers.balance_of(receipt, user)?;

        cx.ledgers
            .approve(cx.events, self.stable, self.address, pool, amount)?;
        let handle = LedgerHandle::new(cx.ledgers, cx.events, pool);
        cx.lending
            .deposit(handle, self.address, self.stable, amount, user)
            .map_err(|e| {
                warn!(%user, %amount, error = %e, "lending deposit reverted");
                EngineError::ExternalCallFailed("lending deposit reverted")
            })?;

        let held_after = cx.ledgers.balance_of(self.stable, self.address)?;
        let receipts_after = cx.ledgers.balance_of(receipt, user)?;
        if held_before.checked_sub(&held_after) != Some(amount) {
            return Err(EngineError::ExternalCallFailed(
                "lending pool did not take the exact deposit",
            ));
        }
        if receipts_after.checked_sub(&receipts_before) != Some(amount) {
            return Err(EngineError::ExternalCallFailed(
                "lending pool did not mint receipts one to one",
            ));
        }

        debug!(%user, %amount, "deposited to lending");
        cx.events.push(Event::Deposited {
            user,
            asset: self.stable,
            amount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests;
