//! Property-based tests for ledger and pool invariants.
//!
//! 1. **Supply conservation**: the sum of balances equals total supply
//!    after any sequence of ledger operations.
//! 2. **k monotonicity**: `reserve_a × reserve_b` never decreases across a
//!    swap.
//! 3. **Quote fidelity**: a swap pays exactly what `get_amount_out`
//!    quoted against the same reserves.
//! 4. **Swap reversibility**: a round trip A→B→A never returns more than
//!    it started with.
//! 5. **Reserve backing**: pool reserves always equal the engine's ledger
//!    balances.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Address, Amount, Decimals, FeeTier, PairSeed, SwapRequest, Token};
use crate::events::EventLog;
use crate::ledger::{Ledgers, TokenLedger};
use crate::pools::PoolEngine;
use crate::traits::FromConfig;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const AMM: Address = Address::from_low_u64(0xA);
const LP: Address = Address::from_low_u64(1);
const TRADER: Address = Address::from_low_u64(2);
const TOKEN_A: Address = Address::from_low_u64(10);
const TOKEN_B: Address = Address::from_low_u64(20);

fn account(i: u8) -> Address {
    Address::from_low_u64(u64::from(i) + 100)
}

fn seeded_engine(ra: u128, rb: u128) -> (Ledgers, PoolEngine) {
    let mut ledgers = Ledgers::new();
    let mut events = EventLog::new();
    for (addr, sym) in [(TOKEN_A, "AAA"), (TOKEN_B, "BBB")] {
        let Ok(token) = Token::new(addr, sym, Decimals::MAX) else {
            panic!("valid token");
        };
        let Ok(()) = ledgers.register(token, LP) else {
            panic!("register");
        };
        for holder in [LP, TRADER] {
            let Ok(()) = ledgers.mint(&mut events, LP, addr, holder, Amount::new(1u128 << 100))
            else {
                panic!("mint");
            };
            let Ok(()) = ledgers.approve(&mut events, addr, holder, AMM, Amount::MAX) else {
                panic!("approve");
            };
        }
    }
    let Ok(cfg) = PoolConfig::new(AMM, FeeTier::default()) else {
        panic!("pool config");
    };
    let Ok(mut amm) = PoolEngine::from_config(&cfg) else {
        panic!("pool engine");
    };
    let seed = PairSeed::new(TOKEN_A, TOKEN_B, Amount::new(ra), Amount::new(rb));
    let Ok(_) = amm.initialize_pair(&mut ledgers, &mut events, LP, seed) else {
        panic!("seed");
    };
    (ledgers, amm)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10^24], spanning dust pools to 18-decimal pools.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Swap inputs up to ten times a typical reserve.
fn input_strategy() -> impl Strategy<Value = u128> {
    1u128..=10_000_000_000_000_000_000_000_000u128
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Mint(u8, u128),
    Burn(u8, u128),
    Transfer(u8, u8, u128),
    Approve(u8, u8, u128),
    TransferFrom(u8, u8, u8, u128),
}

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    let who = 0u8..5;
    let amount = 0u128..=1_000_000u128;
    prop_oneof![
        (who.clone(), amount.clone()).prop_map(|(a, n)| LedgerOp::Mint(a, n)),
        (who.clone(), amount.clone()).prop_map(|(a, n)| LedgerOp::Burn(a, n)),
        (who.clone(), who.clone(), amount.clone())
            .prop_map(|(a, b, n)| LedgerOp::Transfer(a, b, n)),
        (who.clone(), who.clone(), amount.clone())
            .prop_map(|(a, b, n)| LedgerOp::Approve(a, b, n)),
        (who.clone(), who.clone(), who, amount)
            .prop_map(|(s, o, t, n)| LedgerOp::TransferFrom(s, o, t, n)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -----------------------------------------------------------------------
    // Property 1: Supply conservation
    // -----------------------------------------------------------------------

    #[test]
    fn prop_balances_sum_to_supply(ops in prop::collection::vec(ledger_op_strategy(), 1..60)) {
        let Ok(token) = Token::new(TOKEN_A, "AAA", Decimals::MAX) else {
            panic!("valid token");
        };
        let mut ledger = TokenLedger::new(token, LP);
        for op in ops {
            let before = ledger.clone();
            let result = match op {
                LedgerOp::Mint(a, n) => ledger.mint(account(a), Amount::new(n)),
                LedgerOp::Burn(a, n) => ledger.burn(account(a), Amount::new(n)),
                LedgerOp::Transfer(a, b, n) => {
                    ledger.transfer(account(a), account(b), Amount::new(n))
                }
                LedgerOp::Approve(a, b, n) => {
                    ledger.approve(account(a), account(b), Amount::new(n));
                    Ok(())
                }
                LedgerOp::TransferFrom(s, o, t, n) => {
                    ledger.transfer_from(account(s), account(o), account(t), Amount::new(n))
                }
            };
            if result.is_err() {
                prop_assert_eq!(&ledger, &before, "failed op must not mutate");
            }
            let sum: u128 = ledger.holders().map(|(_, b)| b.get()).sum();
            prop_assert_eq!(sum, ledger.total_supply().get());
        }
    }

    // -----------------------------------------------------------------------
    // Property 2 and 3: k monotonicity, quote fidelity
    // -----------------------------------------------------------------------

    #[test]
    fn prop_swap_matches_quote_and_grows_k(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in input_strategy(),
        a_to_b in any::<bool>(),
    ) {
        let (mut ledgers, mut amm) = seeded_engine(ra, rb);
        let (token_in, token_out) = if a_to_b { (TOKEN_A, TOKEN_B) } else { (TOKEN_B, TOKEN_A) };
        let Some(pool) = amm.pools().next() else {
            panic!("seeded pool");
        };
        let k_before = pool.k();

        let Ok(quote) = amm.get_amount_out(token_in, token_out, Amount::new(amount)) else {
            return Ok(());
        };
        let mut events = EventLog::new();
        let request = SwapRequest::unbounded(token_in, token_out, Amount::new(amount));
        match amm.swap_exact_input(&mut ledgers, &mut events, TRADER, request) {
            Ok(outcome) => {
                prop_assert_eq!(outcome.amount_out(), quote);
                let Some(pool) = amm.pools().next() else {
                    panic!("seeded pool");
                };
                prop_assert!(pool.k() >= k_before);
            }
            Err(e) => prop_assert!(quote.is_zero(), "swap failed with {} for quote {}", e, quote),
        }
    }

    // -----------------------------------------------------------------------
    // Property 4: Swap reversibility
    // -----------------------------------------------------------------------

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let (mut ledgers, mut amm) = seeded_engine(ra, rb);
        let mut events = EventLog::new();
        let swap_in = (ra / 1_000).max(1);

        let there = SwapRequest::unbounded(TOKEN_A, TOKEN_B, Amount::new(swap_in));
        let Ok(first) = amm.swap_exact_input(&mut ledgers, &mut events, TRADER, there) else {
            return Ok(());
        };
        let back = SwapRequest::unbounded(TOKEN_B, TOKEN_A, first.amount_out());
        let Ok(second) = amm.swap_exact_input(&mut ledgers, &mut events, TRADER, back) else {
            return Ok(());
        };
        prop_assert!(
            second.amount_out().get() <= swap_in,
            "round trip gained value: {} > {}",
            second.amount_out(), swap_in
        );
    }

    // -----------------------------------------------------------------------
    // Property 5: Reserve backing
    // -----------------------------------------------------------------------

    #[test]
    fn prop_reserves_backed_by_ledger(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in prop::collection::vec((input_strategy(), any::<bool>()), 1..8),
    ) {
        let (mut ledgers, mut amm) = seeded_engine(ra, rb);
        for (amount, a_to_b) in swaps {
            let mut events = EventLog::new();
            let mut draft_ledgers = ledgers.clone();
            let mut draft_amm = amm.clone();
            let (token_in, token_out) = if a_to_b { (TOKEN_A, TOKEN_B) } else { (TOKEN_B, TOKEN_A) };
            let request = SwapRequest::unbounded(token_in, token_out, Amount::new(amount));
            if draft_amm
                .swap_exact_input(&mut draft_ledgers, &mut events, TRADER, request)
                .is_ok()
            {
                ledgers = draft_ledgers;
                amm = draft_amm;
            }
            let Ok((reserve_a, reserve_b)) = amm.reserves(TOKEN_A, TOKEN_B) else {
                panic!("reserves");
            };
            prop_assert_eq!(ledgers.balance_of(TOKEN_A, AMM), Ok(reserve_a));
            prop_assert_eq!(ledgers.balance_of(TOKEN_B, AMM), Ok(reserve_b));
        }
    }
}
