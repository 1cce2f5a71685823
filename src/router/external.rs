//! Externally quoted swaps.
//!
//! The swap leg is delegated to an allowlisted [`ExternalRouter`] with an
//! opaque payload. The router settles on the stable balance it observes
//! afterwards, never on what the payload or quote claims.

use tracing::{debug, warn};

use super::{RouteContext, Router};
use crate::collaborators::AggregatorQuote;
use crate::domain::{Address, Amount};
use crate::error::{EngineError, Result};
use crate::events::Event;
use crate::ledger::LedgerHandle;
use crate::traits::{ExternalRouter, LendingPool};

/// Parameters of an externally quoted platform → stable swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSwap {
    /// Allowlisted external router to invoke.
    pub external_router: Address,
    /// Platform tokens pulled from the caller.
    pub amount_in: Amount,
    /// Minimum stable output the router must observe.
    pub min_out: Amount,
    /// Deposit the output into the lending pool instead of paying it out.
    pub use_lending: bool,
    /// Payload forwarded verbatim.
    pub call_data: Vec<u8>,
}

impl ExternalSwap {
    /// Builds the swap described by an aggregator quote.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the quote payload
    /// is not hex.
    pub fn from_quote(
        quote: &AggregatorQuote,
        amount_in: Amount,
        min_out: Amount,
        use_lending: bool,
    ) -> Result<Self> {
        Ok(Self {
            external_router: quote.to,
            amount_in,
            min_out,
            use_lending,
            call_data: quote.call_data()?,
        })
    }
}

impl Router {
    /// Pulls `swap.amount_in` platform tokens from the caller, lets the
    /// external router spend exactly that much, and settles the stable
    /// tokens it actually delivered. Unspent platform tokens are refunded.
    /// Returns the stable amount settled.
    ///
    /// # Errors
    ///
    /// In order:
    /// - [`EngineError::Unauthorized`] if the external router is not
    ///   allowlisted.
    /// - [`EngineError::ZeroAmount`] if `amount_in` is zero.
    /// - [`EngineError::ExternalCallFailed`] if the external router is not
    ///   deployed or reverts.
    /// - Ledger errors from pulling the input.
    /// - [`EngineError::ExternalCallFailed`] if the stable balance fell or
    ///   more than `amount_in` was spent.
    /// - [`EngineError::SlippageExceeded`] if the stable gain is below
    ///   `min_out`.
    /// - Deposit verification failures when `use_lending` is set.
    pub fn swap_externally_quoted<L: LendingPool, X: ExternalRouter>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        swap: &ExternalSwap,
    ) -> Result<Amount> {
        let target = swap.external_router;
        if !self.is_external_router_approved(target) {
            return Err(EngineError::Unauthorized);
        }
        if swap.amount_in.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        if !cx.aggregators.contains_key(&target) {
            return Err(EngineError::ExternalCallFailed("external router not deployed"));
        }

        cx.ledgers.transfer_from(
            cx.events,
            self.platform,
            self.address,
            caller,
            self.address,
            swap.amount_in,
        )?;
        cx.ledgers
            .approve(cx.events, self.platform, self.address, target, swap.amount_in)?;

        let platform_before = cx.ledgers.balance_of(self.platform, self.address)?;
        let stable_before = cx.ledgers.balance_of(self.stable, self.address)?;
        let aggregator = cx
            .aggregators
            .get_mut(&target)
            .ok_or(EngineError::ExternalCallFailed("external router not deployed"))?;
        let handle = LedgerHandle::new(cx.ledgers, cx.events, target);
        aggregator
            .execute(handle, self.address, &swap.call_data)
            .map_err(|e| {
                warn!(%caller, router = %target, error = %e, "external router reverted");
                EngineError::ExternalCallFailed("external router call reverted")
            })?;
        let platform_after = cx.ledgers.balance_of(self.platform, self.address)?;
        let stable_after = cx.ledgers.balance_of(self.stable, self.address)?;

        let received = stable_after
            .checked_sub(&stable_before)
            .ok_or(EngineError::ExternalCallFailed(
                "external router reduced the stable balance",
            ))?;
        if received < swap.min_out {
            return Err(EngineError::SlippageExceeded {
                min_out: swap.min_out,
                actual: received,
            });
        }
        let spent = platform_before
            .checked_sub(&platform_after)
            .filter(|spent| *spent <= swap.amount_in)
            .ok_or(EngineError::ExternalCallFailed(
                "external router spent more than approved",
            ))?;

        cx.ledgers
            .approve(cx.events, self.platform, self.address, target, Amount::ZERO)?;
        let unspent = swap.amount_in.abs_diff(&spent);
        if !unspent.is_zero() {
            cx.ledgers
                .transfer(cx.events, self.platform, self.address, caller, unspent)?;
        }

        self.settle_stable(cx, caller, received, swap.use_lending)?;

        debug!(
            %caller,
            router = %target,
            %spent,
            %received,
            deposited = swap.use_lending,
            "external swap settled"
        );
        cx.events.push(Event::RouteExecuted {
            account: caller,
            token_in: self.platform,
            token_out: self.stable,
            amount_in: spent,
            amount_out: received,
            hops: 1,
        });
        Ok(received)
    }

    /// [`swap_externally_quoted`](Self::swap_externally_quoted) driven by an
    /// aggregator quote. The quote's `toAmount` is ignored.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if the quote payload is not
    ///   hex.
    /// - Any [`swap_externally_quoted`](Self::swap_externally_quoted) error.
    pub fn swap_with_quote<L: LendingPool, X: ExternalRouter>(
        &self,
        cx: &mut RouteContext<'_, L, X>,
        caller: Address,
        quote: &AggregatorQuote,
        amount_in: Amount,
        min_out: Amount,
        use_lending: bool,
    ) -> Result<Amount> {
        let swap = ExternalSwap::from_quote(quote, amount_in, min_out, use_lending)?;
        self.swap_externally_quoted(cx, caller, &swap)
    }
}
