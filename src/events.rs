//! Events appended by committed operations.
//!
//! Every state change the engine commits is described by one or more
//! [`Event`]s in its [`EventLog`]. Events are emitted into the transaction's
//! draft state, so a rolled-back operation leaves no trace in the log.
//! They serialize with serde for off-chain consumers; see
//! [`MarketIndex`](crate::indexer::MarketIndex) for a replaying consumer.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, BasisPoints, CourseId, PairKey};

/// A single observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Ledger balance movement. `from == None` is a mint, `to == None` a burn.
    Transfer {
        /// Ledger the movement happened on.
        token: Address,
        /// Debited account.
        from: Option<Address>,
        /// Credited account.
        to: Option<Address>,
        /// Amount moved.
        amount: Amount,
    },

    /// Allowance overwritten.
    Approval {
        /// Ledger the allowance belongs to.
        token: Address,
        /// Account whose tokens may be spent.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        amount: Amount,
    },

    /// A pool received its initial liquidity.
    PairInitialized {
        /// Canonical pair.
        pair: PairKey,
        /// Account that supplied the liquidity.
        provider: Address,
        /// Reserve of the lower-address token.
        reserve_a: Amount,
        /// Reserve of the higher-address token.
        reserve_b: Amount,
    },

    /// One pool swap executed.
    Swapped {
        /// Account that paid in and received out.
        trader: Address,
        /// Token sold.
        token_in: Address,
        /// Token bought.
        token_out: Address,
        /// Exact input.
        amount_in: Amount,
        /// Output paid.
        amount_out: Amount,
    },

    /// Native currency wrapped.
    Wrapped {
        /// Account credited with wrapped tokens.
        account: Address,
        /// Amount wrapped.
        amount: Amount,
    },

    /// Wrapped tokens redeemed for native currency.
    Unwrapped {
        /// Account credited with native currency.
        account: Address,
        /// Amount unwrapped.
        amount: Amount,
    },

    /// Native currency swapped into the platform token.
    NativeSwapped {
        /// Paying account.
        account: Address,
        /// Native value attached.
        native_in: Amount,
        /// Platform tokens received.
        platform_out: Amount,
    },

    /// A multi-hop route completed.
    RouteExecuted {
        /// Initiating account.
        account: Address,
        /// Token paid into the first hop.
        token_in: Address,
        /// Token received from the last hop.
        token_out: Address,
        /// Input amount.
        amount_in: Amount,
        /// Final output amount.
        amount_out: Amount,
        /// Number of hops.
        hops: u32,
    },

    /// Router output deposited into the lending pool for a user.
    Deposited {
        /// Beneficiary of the receipt tokens.
        user: Address,
        /// Deposited asset.
        asset: Address,
        /// Amount deposited.
        amount: Amount,
    },

    /// Receipt tokens redeemed from the lending pool.
    Withdrawn {
        /// Redeeming account.
        user: Address,
        /// Asset released.
        asset: Address,
        /// Amount released.
        amount: Amount,
    },

    /// External router allowlist changed.
    ExternalRouterApproval {
        /// External router.
        router: Address,
        /// New approval state.
        approved: bool,
    },

    /// Course listed.
    CourseCreated {
        /// Assigned identifier.
        id: CourseId,
        /// Author.
        author: Address,
        /// Listing price.
        price: Amount,
        /// Metadata URI.
        metadata_uri: String,
    },

    /// Course price or metadata edited.
    CourseUpdated {
        /// Course.
        id: CourseId,
        /// New price.
        price: Amount,
        /// New metadata URI.
        metadata_uri: String,
    },

    /// Course delisted.
    CourseDeactivated {
        /// Course.
        id: CourseId,
    },

    /// Course bought.
    Purchased {
        /// Course.
        id: CourseId,
        /// Buyer granted access.
        buyer: Address,
        /// Author paid.
        author: Address,
        /// Full price paid by the buyer.
        price: Amount,
        /// Share paid to the fee recipient.
        fee: Amount,
    },

    /// Marketplace fee parameters changed.
    FeeConfigUpdated {
        /// Fee in basis points.
        fee_bps: BasisPoints,
        /// Account receiving fees.
        fee_recipient: Address,
    },
}

/// Append-only list of committed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog(Vec<Event>);

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.0.push(event);
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All events in commit order.
    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.0
    }

    /// Events recorded at or after position `start`.
    #[must_use]
    pub fn since(&self, start: usize) -> &[Event] {
        self.0.get(start..).unwrap_or_default()
    }

    /// Iterates in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.0.iter()
    }

    /// Drops everything recorded at or after position `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}
