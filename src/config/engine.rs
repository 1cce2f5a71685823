//! Top-level engine blueprint.
//!
//! [`EngineConfig`] describes one complete deployment: the native currency
//! issuer, the three traded tokens, the lending pool, the AMM, the router
//! and the marketplace. [`validate`](EngineConfig::validate) checks every
//! part and the wiring between them, so an engine built from a valid
//! config never discovers a missing ledger at transaction time.

use serde::{Deserialize, Serialize};

use super::token::validate_genesis;
use super::{Allocation, LendingConfig, MarketConfig, PoolConfig, RouterConfig, TokenConfig};
use crate::domain::{Address, Amount, BasisPoints, Decimals, FeeTier};
use crate::error::{EngineError, Result};

/// Fixed addresses of the [`EngineConfig::devnet`] deployment.
pub mod devnet {
    use crate::domain::Address;

    /// Platform token.
    pub const LENS: Address = Address::from_low_u64(0x1001);
    /// Wrapped native token.
    pub const WETH: Address = Address::from_low_u64(0x1002);
    /// Stable token.
    pub const USDT: Address = Address::from_low_u64(0x1003);
    /// Lending receipt token.
    pub const A_USDT: Address = Address::from_low_u64(0x1004);
    /// AMM pool engine.
    pub const AMM: Address = Address::from_low_u64(0x2001);
    /// Swap router.
    pub const ROUTER: Address = Address::from_low_u64(0x2002);
    /// Course marketplace.
    pub const MARKET: Address = Address::from_low_u64(0x2003);
    /// Lending pool.
    pub const LENDING: Address = Address::from_low_u64(0x2004);
}

/// A complete deployment description.
///
/// Fields are private; build one with [`new`](Self::new), [`devnet`](Self::devnet)
/// or [`from_json_str`](Self::from_json_str), all of which validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    native_issuer: Address,
    #[serde(default)]
    native_genesis: Vec<Allocation>,
    platform: TokenConfig,
    wrapped_native: TokenConfig,
    stable: TokenConfig,
    lending: LendingConfig,
    pool: PoolConfig,
    router: RouterConfig,
    market: MarketConfig,
}

impl EngineConfig {
    /// Assembles and validates a deployment.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        native_issuer: Address,
        native_genesis: Vec<Allocation>,
        platform: TokenConfig,
        wrapped_native: TokenConfig,
        stable: TokenConfig,
        lending: LendingConfig,
        pool: PoolConfig,
        router: RouterConfig,
        market: MarketConfig,
    ) -> Result<Self> {
        let config = Self {
            native_issuer,
            native_genesis,
            platform,
            wrapped_native,
            stable,
            lending,
            pool,
            router,
            market,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON deployment description.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if the JSON is malformed.
    /// - Any [`validate`](Self::validate) failure.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "engine config rejected");
            EngineError::InvalidConfiguration("malformed engine config JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|_| EngineError::InvalidConfiguration("engine config not serializable"))
    }

    /// A local deployment: `owner` issues native currency, mints the
    /// platform and stable tokens, owns router and marketplace and receives
    /// marketplace fees. Genesis credits `owner` with 20 000 native,
    /// 1 000 000 LENS and 1 000 000 USDT; fees are 0.3% per swap and 5%
    /// per sale.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `owner` is the
    /// native key or collides with a [`devnet`] address.
    pub fn devnet(owner: Address) -> Result<Self> {
        let lens = Self::units(1_000_000, Decimals::MAX)?;
        let usdt = Self::units(1_000_000, Decimals::STABLE)?;
        let eth = Self::units(20_000, Decimals::MAX)?;

        let platform = TokenConfig::new(devnet::LENS, "LENS", Decimals::MAX, owner)?
            .with_genesis(owner, lens);
        let wrapped_native =
            TokenConfig::new(devnet::WETH, "WETH", Decimals::MAX, devnet::WETH)?;
        let stable = TokenConfig::new(devnet::USDT, "USDT", Decimals::STABLE, owner)?
            .with_genesis(owner, usdt);
        let receipt =
            TokenConfig::new(devnet::A_USDT, "aUSDT", Decimals::STABLE, devnet::LENDING)?;

        Self::new(
            owner,
            vec![Allocation {
                holder: owner,
                amount: eth,
            }],
            platform,
            wrapped_native,
            stable,
            LendingConfig::new(devnet::LENDING, devnet::USDT, receipt)?,
            PoolConfig::new(devnet::AMM, FeeTier::TIER_0_30_PERCENT)?,
            RouterConfig::new(devnet::ROUTER, owner)?,
            MarketConfig::new(
                devnet::MARKET,
                owner,
                devnet::LENS,
                owner,
                BasisPoints::new(500),
            )?,
        )
    }

    fn units(whole: u128, decimals: Decimals) -> Result<Amount> {
        decimals.scale_up(whole)
    }

    /// Validates every part and the wiring between them.
    ///
    /// # Errors
    ///
    /// - Any component's own validation error.
    /// - [`EngineError::InvalidConfiguration`] if contract addresses
    ///   collide, the wrapped token is not its own minter, the lending
    ///   asset is not the stable token, or the marketplace is not priced
    ///   in the platform token.
    pub fn validate(&self) -> Result<()> {
        if self.native_issuer.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "native issuer must not be the native key",
            ));
        }
        validate_genesis(&self.native_genesis)?;
        self.platform.validate()?;
        self.wrapped_native.validate()?;
        self.stable.validate()?;
        self.lending.validate()?;
        self.pool.validate()?;
        self.router.validate()?;
        self.market.validate()?;

        let contracts = [
            self.platform.address(),
            self.wrapped_native.address(),
            self.stable.address(),
            self.lending.receipt().address(),
            self.lending.address(),
            self.pool.address(),
            self.router.address(),
            self.market.address(),
        ];
        for (i, a) in contracts.iter().enumerate() {
            if contracts.iter().skip(i + 1).any(|b| b == a) {
                return Err(EngineError::InvalidConfiguration(
                    "contract addresses must be distinct",
                ));
            }
        }
        if self.wrapped_native.minter() != self.wrapped_native.address() {
            return Err(EngineError::InvalidConfiguration(
                "wrapped native token must be its own minter",
            ));
        }
        if !self.wrapped_native.genesis().is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "wrapped native supply must be backed; use native genesis instead",
            ));
        }
        if self.lending.asset() != self.stable.address() {
            return Err(EngineError::InvalidConfiguration(
                "lending asset must be the stable token",
            ));
        }
        if self.market.payment_token() != self.platform.address() {
            return Err(EngineError::InvalidConfiguration(
                "marketplace must be priced in the platform token",
            ));
        }
        Ok(())
    }

    /// Account allowed to mint native currency.
    #[must_use]
    pub const fn native_issuer(&self) -> Address {
        self.native_issuer
    }

    /// Native balances credited at build time.
    #[must_use]
    pub fn native_genesis(&self) -> &[Allocation] {
        &self.native_genesis
    }

    /// Platform token blueprint.
    #[must_use]
    pub const fn platform(&self) -> &TokenConfig {
        &self.platform
    }

    /// Wrapped native token blueprint.
    #[must_use]
    pub const fn wrapped_native(&self) -> &TokenConfig {
        &self.wrapped_native
    }

    /// Stable token blueprint.
    #[must_use]
    pub const fn stable(&self) -> &TokenConfig {
        &self.stable
    }

    /// Lending pool blueprint.
    #[must_use]
    pub const fn lending(&self) -> &LendingConfig {
        &self.lending
    }

    /// Pool engine blueprint.
    #[must_use]
    pub const fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Router blueprint.
    #[must_use]
    pub const fn router(&self) -> &RouterConfig {
        &self.router
    }

    /// Marketplace blueprint.
    #[must_use]
    pub const fn market(&self) -> &MarketConfig {
        &self.market
    }
}
