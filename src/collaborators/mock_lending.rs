//! In-memory lending pool with 1:1 receipt tokens.

use tracing::debug;

use crate::config::LendingConfig;
use crate::domain::{Address, Amount, BasisPoints, Rounding};
use crate::error::{EngineError, Result};
use crate::ledger::LedgerHandle;
use crate::traits::{FromConfig, LendingPool};

/// A lending pool that holds deposits and mints one receipt token per unit
/// deposited. Receipts are redeemable 1:1; no interest accrues.
///
/// Two fault knobs let tests exercise the router's verification:
/// [`paused`](Self::paused) makes every call revert, and
/// [`with_receipt_rate`](Self::with_receipt_rate) mints fewer receipts than
/// deposited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockLendingPool {
    address: Address,
    asset: Address,
    receipt_token: Address,
    receipt_rate: BasisPoints,
    paused: bool,
}

impl FromConfig<LendingConfig> for MockLendingPool {
    fn from_config(config: &LendingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            asset: config.asset(),
            receipt_token: config.receipt().address(),
            receipt_rate: BasisPoints::MAX_PERCENT,
            paused: false,
        })
    }
}

impl MockLendingPool {
    /// Mints `rate` of each deposit as receipts instead of 100%.
    #[must_use]
    pub const fn with_receipt_rate(mut self, rate: BasisPoints) -> Self {
        self.receipt_rate = rate;
        self
    }

    /// Makes every subsequent call revert.
    #[must_use]
    pub const fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    fn ensure_live(&self, asset: Address) -> Result<()> {
        if self.paused {
            return Err(EngineError::ExternalCallFailed("lending pool paused"));
        }
        if asset != self.asset {
            return Err(EngineError::InvalidToken("asset not listed by lending pool"));
        }
        Ok(())
    }
}

impl LendingPool for MockLendingPool {
    fn address(&self) -> Address {
        self.address
    }

    fn asset(&self) -> Address {
        self.asset
    }

    fn receipt_token(&self) -> Address {
        self.receipt_token
    }

    fn deposit(
        &mut self,
        mut ledger: LedgerHandle<'_>,
        caller: Address,
        asset: Address,
        amount: Amount,
        on_behalf_of: Address,
    ) -> Result<()> {
        self.ensure_live(asset)?;
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let pool = ledger.holder();
        ledger.transfer_from(asset, caller, pool, amount)?;
        let receipts = self.receipt_rate.apply(amount, Rounding::Down)?;
        ledger.mint(self.receipt_token, on_behalf_of, receipts)?;
        debug!(%caller, %on_behalf_of, %amount, %receipts, "lending deposit");
        Ok(())
    }

    fn withdraw(
        &mut self,
        mut ledger: LedgerHandle<'_>,
        caller: Address,
        asset: Address,
        amount: Amount,
        to: Address,
    ) -> Result<Amount> {
        self.ensure_live(asset)?;
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        ledger.burn(self.receipt_token, caller, amount)?;
        ledger.transfer(asset, to, amount)?;
        debug!(%caller, %to, %amount, "lending withdraw");
        Ok(amount)
    }
}
