//! # Lens Engine
//!
//! Value-exchange engine for a course marketplace: fungible token ledgers,
//! a constant-product AMM, a multi-hop swap router that can hand its output
//! to a lending pool, and a marketplace that splits every sale between the
//! course author and a fee recipient.
//!
//! Every contract is an owned data structure behind a typed API, and every
//! externally invoked operation is a transaction: it commits all of its
//! state changes and events, or none of them.
//!
//! # Quick Start
//!
//! ```rust
//! use lens_engine::prelude::*;
//!
//! let owner = Address::from_low_u64(0xA11CE);
//! let mut engine: Engine = Engine::new(EngineConfig::devnet(owner).expect("config"))
//!     .expect("genesis");
//!
//! // Seed LENS/WETH at 500 000 : 10 000.
//! let lens = Amount::units(500_000, 18).expect("units");
//! let weth = Amount::units(10_000, 18).expect("units");
//! engine.wrap(owner, weth).expect("wrap");
//! engine.approve(owner, devnet::LENS, devnet::AMM, lens).expect("approve");
//! engine.approve(owner, devnet::WETH, devnet::AMM, weth).expect("approve");
//! engine
//!     .initialize_pair(owner, PairSeed::new(devnet::LENS, devnet::WETH, lens, weth))
//!     .expect("seed");
//!
//! // Buy LENS with native currency.
//! let value = Amount::units(1, 18).expect("units");
//! let quoted = engine.get_amount_out(devnet::WETH, devnet::LENS, value).expect("quote");
//! let received = engine
//!     .swap_native_for_token(owner, value, quoted)
//!     .expect("swap");
//! assert_eq!(received, quoted);
//! ```
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────────────── Engine ────────────────────────┐
//!            │  transact(): clone state → run on draft → commit/drop  │
//!            └──┬───────────────┬───────────────┬──────────────────┬──┘
//!               │               │               │                  │
//!          ┌────▼────┐     ┌────▼────┐     ┌────▼─────┐     ┌──────▼──────┐
//!          │ Router  │────►│  Pools  │     │  Market  │     │ Lending /   │
//!          │         │────────────────────────────────────►│ Aggregators │
//!          └────┬────┘     └────┬────┘     └────┬─────┘     └──────┬──────┘
//!               │               │               │                  │
//!          ┌────▼───────────────▼───────────────▼──────────────────▼──┐
//!          │                    Ledgers + EventLog                    │
//!          └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Address`](domain::Address), [`Route`](domain::Route), [`Course`](domain::Course), etc. |
//! | [`ledger`] | [`Ledgers`](ledger::Ledgers) registry, per-token [`TokenLedger`](ledger::TokenLedger), [`WrappedNative`](ledger::WrappedNative), collaborator [`LedgerHandle`](ledger::LedgerHandle) |
//! | [`pools`] | [`PoolEngine`](pools::PoolEngine) and the [`amount_out`](pools::amount_out) pricing function |
//! | [`router`] | [`Router`](router::Router): native, multi-hop, lending and aggregator paths |
//! | [`market`] | [`CourseMarket`](market::CourseMarket) and the fee [`split`](market::split) |
//! | [`engine`] | [`Engine`](engine::Engine), the transactional state root |
//! | [`traits`] | Collaborator seams: [`LendingPool`](traits::LendingPool), [`ExternalRouter`](traits::ExternalRouter), [`FromConfig`](traits::FromConfig) |
//! | [`collaborators`] | [`MockLendingPool`](collaborators::MockLendingPool), [`MockAggregator`](collaborators::MockAggregator), [`AggregatorQuote`](collaborators::AggregatorQuote) |
//! | [`events`] | [`Event`](events::Event) and [`EventLog`](events::EventLog) |
//! | [`indexer`] | [`MarketIndex`](indexer::MarketIndex), rebuilt from events |
//! | [`config`] | Validated deployment blueprints and [`EngineConfig`](config::EngineConfig) |
//! | [`math`] | Checked arithmetic and 256-bit intermediates |
//! | [`error`] | [`EngineError`](error::EngineError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod collaborators;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod indexer;
pub mod ledger;
pub mod market;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
