//! In-memory swap aggregator driven by JSON call data.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AggregatorQuote;
use crate::domain::{Address, Amount, BasisPoints, Rounding};
use crate::error::{EngineError, Result};
use crate::ledger::LedgerHandle;
use crate::traits::ExternalRouter;

/// The order an aggregator payload encodes: sell `amount_in` of `token_in`
/// for `amount_out` of `token_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorOrder {
    /// Token pulled from the caller.
    pub token_in: Address,
    /// Token paid to the caller.
    pub token_out: Address,
    /// Input pulled via the caller's allowance.
    pub amount_in: Amount,
    /// Output promised.
    pub amount_out: Amount,
}

impl AggregatorOrder {
    /// Encodes the order as call data.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidConfiguration("order is not encodable"))
    }
}

/// An aggregator that fills orders from its own inventory.
///
/// `haircut` short-pays every fill by that share of the promised output,
/// modelling a quote that the realized execution does not honor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAggregator {
    address: Address,
    haircut: BasisPoints,
}

impl MockAggregator {
    /// An honest aggregator at `address`.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            haircut: BasisPoints::ZERO,
        }
    }

    /// Short-pays every fill by `haircut`.
    #[must_use]
    pub const fn with_haircut(mut self, haircut: BasisPoints) -> Self {
        self.haircut = haircut;
        self
    }

    /// Quote for `order`, reporting the promised output regardless of any
    /// haircut.
    ///
    /// # Errors
    ///
    /// Propagates [`AggregatorOrder::encode`] failures.
    pub fn quote(&self, order: &AggregatorOrder) -> Result<AggregatorQuote> {
        Ok(AggregatorQuote::new(
            self.address,
            &order.encode()?,
            order.amount_out,
        ))
    }
}

impl ExternalRouter for MockAggregator {
    fn address(&self) -> Address {
        self.address
    }

    fn execute(
        &mut self,
        mut ledger: LedgerHandle<'_>,
        caller: Address,
        call_data: &[u8],
    ) -> Result<()> {
        let order: AggregatorOrder = serde_json::from_slice(call_data)
            .map_err(|_| EngineError::ExternalCallFailed("undecodable call data"))?;
        let inventory = ledger.holder();
        ledger.transfer_from(order.token_in, caller, inventory, order.amount_in)?;
        let withheld = self.haircut.apply(order.amount_out, Rounding::Up)?;
        let paid = order
            .amount_out
            .checked_sub(&withheld)
            .ok_or(EngineError::Underflow("haircut exceeds output"))?;
        ledger.transfer(order.token_out, caller, paid)?;
        debug!(%caller, amount_in = %order.amount_in, %paid, "aggregator fill");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token};
    use crate::events::EventLog;
    use crate::ledger::Ledgers;

    const ISSUER: Address = Address::from_low_u64(1);
    const LENS: Address = Address::from_low_u64(10);
    const USDT: Address = Address::from_low_u64(30);
    const AGG: Address = Address::from_low_u64(50);
    const ROUTER: Address = Address::from_low_u64(5);

    fn setup() -> (Ledgers, EventLog) {
        let mut ledgers = Ledgers::new();
        let mut events = EventLog::new();
        for (addr, symbol) in [(LENS, "LENS"), (USDT, "USDT")] {
            let Ok(token) = Token::new(addr, symbol, Decimals::STABLE) else {
                panic!("token");
            };
            let Ok(()) = ledgers.register(token, ISSUER) else {
                panic!("register");
            };
        }
        let Ok(()) = ledgers.mint(&mut events, ISSUER, LENS, ROUTER, Amount::new(1_000)) else {
            panic!("fund router");
        };
        let Ok(()) = ledgers.mint(&mut events, ISSUER, USDT, AGG, Amount::new(10_000)) else {
            panic!("fund aggregator");
        };
        let Ok(()) = ledgers.approve(&mut events, LENS, ROUTER, AGG, Amount::new(1_000)) else {
            panic!("approve");
        };
        (ledgers, events)
    }

    fn order() -> AggregatorOrder {
        AggregatorOrder {
            token_in: LENS,
            token_out: USDT,
            amount_in: Amount::new(1_000),
            amount_out: Amount::new(2_000),
        }
    }

    #[test]
    fn honest_fill() {
        let (mut ledgers, mut events) = setup();
        let mut agg = MockAggregator::new(AGG);
        let Ok(data) = order().encode() else {
            panic!("encode");
        };
        let handle = LedgerHandle::new(&mut ledgers, &mut events, AGG);
        let Ok(()) = agg.execute(handle, ROUTER, &data) else {
            panic!("fill");
        };
        assert_eq!(ledgers.balance_of(USDT, ROUTER), Ok(Amount::new(2_000)));
        assert_eq!(ledgers.balance_of(LENS, AGG), Ok(Amount::new(1_000)));
        assert_eq!(ledgers.allowance(LENS, ROUTER, AGG), Ok(Amount::ZERO));
    }

    #[test]
    fn haircut_short_pays() {
        let (mut ledgers, mut events) = setup();
        let mut agg = MockAggregator::new(AGG).with_haircut(BasisPoints::new(1_000));
        let Ok(data) = order().encode() else {
            panic!("encode");
        };
        let handle = LedgerHandle::new(&mut ledgers, &mut events, AGG);
        let Ok(()) = agg.execute(handle, ROUTER, &data) else {
            panic!("fill");
        };
        assert_eq!(ledgers.balance_of(USDT, ROUTER), Ok(Amount::new(1_800)));
    }

    #[test]
    fn garbage_call_data_fails() {
        let (mut ledgers, mut events) = setup();
        let mut agg = MockAggregator::new(AGG);
        let handle = LedgerHandle::new(&mut ledgers, &mut events, AGG);
        assert!(matches!(
            agg.execute(handle, ROUTER, b"\x12\xaa"),
            Err(EngineError::ExternalCallFailed(_))
        ));
    }

    #[test]
    fn quote_reports_promise_not_fill() {
        let agg = MockAggregator::new(AGG).with_haircut(BasisPoints::new(1_000));
        let Ok(quote) = agg.quote(&order()) else {
            panic!("quote");
        };
        assert_eq!(quote.to, AGG);
        assert_eq!(quote.quoted_amount(), Ok(Amount::new(2_000)));
        let Ok(data) = quote.call_data() else {
            panic!("decode");
        };
        assert_eq!(serde_json::from_slice::<AggregatorOrder>(&data).ok(), Some(order()));
    }
}
