#![allow(clippy::panic)]

use super::*;
use crate::collaborators::{AggregatorOrder, MockAggregator, MockLendingPool};
use crate::config::devnet;
use crate::domain::{BasisPoints, PairSeed};
use crate::engine::EngineState;

const OWNER: Address = Address::from_low_u64(0xA11CE);
const BOB: Address = Address::from_low_u64(0xB0B);
const AGG: Address = Address::from_low_u64(0x5001);

type State = EngineState<MockLendingPool, MockAggregator>;

// -- Shared helpers ----------------------------------------------------------

fn units(whole: u128, decimals: u8) -> Amount {
    let Some(a) = Amount::units(whole, decimals) else {
        panic!("units overflow");
    };
    a
}

fn lens(whole: u128) -> Amount {
    units(whole, 18)
}

fn usdt(whole: u128) -> Amount {
    units(whole, 6)
}

fn approve(s: &mut State, token: Address, owner: Address, spender: Address, amount: Amount) {
    let Ok(()) = s.ledgers.approve(&mut s.events, token, owner, spender, amount) else {
        panic!("approve");
    };
}

fn give(s: &mut State, token: Address, to: Address, amount: Amount) {
    let Ok(()) = s.ledgers.transfer(&mut s.events, token, OWNER, to, amount) else {
        panic!("fund {to}");
    };
}

fn balance(s: &State, token: Address, owner: Address) -> Amount {
    let Ok(b) = s.ledgers.balance_of(token, owner) else {
        panic!("balance");
    };
    b
}

/// Devnet genesis with LENS/WETH seeded 500 000 : 10 000 and WETH/USDT
/// 200 : 400 000, and Bob holding 10 000 LENS.
fn state_with(lending: impl FnOnce(MockLendingPool) -> MockLendingPool) -> State {
    let Ok(config) = EngineConfig::devnet(OWNER) else {
        panic!("devnet config");
    };
    let Ok(pool) = MockLendingPool::from_config(config.lending()) else {
        panic!("lending pool");
    };
    let Ok(mut s) = State::genesis(&config, lending(pool)) else {
        panic!("genesis");
    };

    let weth = s.router.wrapped_native();
    let Ok(()) = weth.wrap(&mut s.ledgers, &mut s.events, OWNER, OWNER, lens(10_200)) else {
        panic!("wrap");
    };
    approve(&mut s, devnet::LENS, OWNER, devnet::AMM, lens(500_000));
    approve(&mut s, devnet::WETH, OWNER, devnet::AMM, lens(10_200));
    approve(&mut s, devnet::USDT, OWNER, devnet::AMM, usdt(400_000));
    for seed in [
        PairSeed::new(devnet::LENS, devnet::WETH, lens(500_000), lens(10_000)),
        PairSeed::new(devnet::WETH, devnet::USDT, lens(200), usdt(400_000)),
    ] {
        let Ok(_) = s
            .pools
            .initialize_pair(&mut s.ledgers, &mut s.events, OWNER, seed)
        else {
            panic!("seed");
        };
    }
    give(&mut s, devnet::LENS, BOB, lens(10_000));
    s
}

fn state() -> State {
    state_with(|p| p)
}

fn expected_stable(s: &State, amount_in: Amount) -> Amount {
    let Ok(mid) = s.pools.get_amount_out(devnet::LENS, devnet::WETH, amount_in) else {
        panic!("quote hop 1");
    };
    let Ok(out) = s.pools.get_amount_out(devnet::WETH, devnet::USDT, mid) else {
        panic!("quote hop 2");
    };
    out
}

fn router_is_empty(s: &State) -> bool {
    [devnet::LENS, devnet::WETH, devnet::USDT]
        .iter()
        .all(|t| balance(s, *t, devnet::ROUTER).is_zero())
}

fn with_aggregator(s: &mut State, agg: MockAggregator) {
    give(s, devnet::USDT, AGG, usdt(100_000));
    s.aggregators.insert(AGG, agg);
    let Ok(()) = s
        .router
        .set_external_router_approval(&mut s.events, OWNER, AGG, true)
    else {
        panic!("approve aggregator");
    };
}

fn order(amount_in: Amount, amount_out: Amount) -> ExternalSwap {
    let o = AggregatorOrder {
        token_in: devnet::LENS,
        token_out: devnet::USDT,
        amount_in,
        amount_out,
    };
    let Ok(call_data) = o.encode() else {
        panic!("encode");
    };
    ExternalSwap {
        external_router: AGG,
        amount_in: lens(1_000),
        min_out: Amount::ZERO,
        use_lending: false,
        call_data,
    }
}

// -- Native ------------------------------------------------------------------

#[test]
fn native_swap_pays_quoted_platform_tokens() {
    let mut s = state();
    let value = lens(1);
    let Ok(expected) = s.pools.get_amount_out(devnet::WETH, devnet::LENS, value) else {
        panic!("quote");
    };
    let native_before = balance(&s, Address::NATIVE, OWNER);
    let lens_before = balance(&s, devnet::LENS, OWNER);

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_native_for_token(&mut cx, OWNER, value, expected) else {
        panic!("swap");
    };

    assert_eq!(out, expected);
    assert_eq!(balance(&s, devnet::LENS, OWNER), lens_before.checked_add(&out).unwrap_or_default());
    assert_eq!(native_before.checked_sub(&balance(&s, Address::NATIVE, OWNER)), Some(value));
    assert!(router_is_empty(&s));
    assert!(matches!(
        s.events.as_slice().last(),
        Some(Event::NativeSwapped { platform_out, .. }) if *platform_out == out
    ));
}

#[test]
fn zero_native_value_rejected() {
    let mut s = state();
    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_native_for_token(&mut cx, OWNER, Amount::ZERO, Amount::ZERO),
        Err(EngineError::ZeroAmount)
    );
}

#[test]
fn native_swap_bounded_by_min_out() {
    let mut s = state();
    let (router, mut cx) = s.route();
    assert!(matches!(
        router.swap_native_for_token(&mut cx, OWNER, lens(1), lens(1_000)),
        Err(EngineError::SlippageExceeded { .. })
    ));
}

// -- Platform to stable ------------------------------------------------------

#[test]
fn two_hop_pays_stable_to_caller() {
    let mut s = state();
    let amount_in = lens(1_000);
    let expected = expected_stable(&s, amount_in);
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, amount_in);

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_token_to_stable(&mut cx, BOB, amount_in, expected, false) else {
        panic!("route");
    };

    assert_eq!(out, expected);
    assert_eq!(balance(&s, devnet::USDT, BOB), expected);
    assert_eq!(balance(&s, devnet::LENS, BOB), lens(9_000));
    assert!(router_is_empty(&s));
    assert!(s.events.iter().any(|e| matches!(
        e,
        Event::RouteExecuted { hops: 2, account, .. } if *account == BOB
    )));
}

#[test]
fn two_hop_deposits_receipts_one_to_one() {
    let mut s = state();
    let amount_in = lens(1_000);
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, amount_in);

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_token_to_stable(&mut cx, BOB, amount_in, Amount::ZERO, true) else {
        panic!("route");
    };

    assert_eq!(s.router.receipt_balance(&s.ledgers, BOB), Ok(out));
    assert_eq!(balance(&s, devnet::USDT, devnet::LENDING), out);
    assert_eq!(balance(&s, devnet::USDT, BOB), Amount::ZERO);
    assert!(router_is_empty(&s));
    assert!(matches!(
        s.events.as_slice().last(),
        Some(Event::Deposited { user, amount, .. }) if *user == BOB && *amount == out
    ));
}

#[test]
fn unapproved_input_rejected() {
    let mut s = state();
    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_token_to_stable(&mut cx, BOB, lens(1), Amount::ZERO, false),
        Err(EngineError::InsufficientAllowance)
    );
}

#[test]
fn intermediate_bound_enforced() {
    let mut s = state();
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let (router, mut cx) = s.route();
    assert!(matches!(
        router.deposit_from_platform_token(&mut cx, BOB, lens(1_000), lens(21), Amount::ZERO),
        Err(EngineError::SlippageExceeded { .. })
    ));
}

#[test]
fn deposit_from_platform_token_always_deposits() {
    let mut s = state();
    let amount_in = lens(500);
    let expected = expected_stable(&s, amount_in);
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, amount_in);
    let (router, mut cx) = s.route();
    let Ok(out) = router.deposit_from_platform_token(&mut cx, BOB, amount_in, lens(9), expected)
    else {
        panic!("deposit");
    };
    assert_eq!(out, expected);
    assert_eq!(balance(&s, devnet::A_USDT, BOB), expected);
}

#[test]
fn paused_lending_fails_external_call() {
    let mut s = state_with(MockLendingPool::paused);
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let (router, mut cx) = s.route();
    assert!(matches!(
        router.swap_token_to_stable(&mut cx, BOB, lens(1_000), Amount::ZERO, true),
        Err(EngineError::ExternalCallFailed(_))
    ));
}

#[test]
fn short_minting_lending_detected() {
    let mut s = state_with(|p| p.with_receipt_rate(BasisPoints::new(9_999)));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_token_to_stable(&mut cx, BOB, lens(1_000), Amount::ZERO, true),
        Err(EngineError::ExternalCallFailed(
            "lending pool did not mint receipts one to one"
        ))
    );
}

#[test]
fn withdraw_redeems_receipts() {
    let mut s = state();
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_token_to_stable(&mut cx, BOB, lens(1_000), Amount::ZERO, true) else {
        panic!("deposit");
    };
    let Ok(released) = router.withdraw_from_lending(&mut cx, BOB, out) else {
        panic!("withdraw");
    };
    assert_eq!(released, out);
    assert_eq!(balance(&s, devnet::USDT, BOB), out);
    assert_eq!(balance(&s, devnet::A_USDT, BOB), Amount::ZERO);

    let (router, mut cx) = s.route();
    assert!(matches!(
        router.withdraw_from_lending(&mut cx, BOB, Amount::new(1)),
        Err(EngineError::ExternalCallFailed(_))
    ));
}

// -- Arbitrary routes --------------------------------------------------------

#[test]
fn single_hop_route() {
    let mut s = state();
    give(&mut s, devnet::WETH, BOB, lens(1));
    approve(&mut s, devnet::WETH, BOB, devnet::ROUTER, lens(1));
    let Ok(route) = Route::through(&[devnet::WETH, devnet::USDT]) else {
        panic!("route");
    };
    let Ok(expected) = s.pools.get_amount_out(devnet::WETH, devnet::USDT, lens(1)) else {
        panic!("quote");
    };
    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_along_route(&mut cx, BOB, &route, lens(1), Amount::ZERO) else {
        panic!("route");
    };
    assert_eq!(out, expected);
    assert_eq!(balance(&s, devnet::USDT, BOB), expected);
}

#[test]
fn route_through_unseeded_pair_fails() {
    let mut s = state();
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1));
    let Ok(route) = Route::through(&[devnet::LENS, devnet::USDT]) else {
        panic!("route");
    };
    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_along_route(&mut cx, BOB, &route, lens(1), Amount::ZERO),
        Err(EngineError::PoolNotSeeded)
    );
}

// -- External aggregator -----------------------------------------------------

#[test]
fn allowlist_is_owner_controlled() {
    let mut s = state();
    assert_eq!(
        s.router
            .set_external_router_approval(&mut s.events, BOB, AGG, true),
        Err(EngineError::Unauthorized)
    );
    let Ok(()) = s
        .router
        .set_external_router_approval(&mut s.events, OWNER, AGG, true)
    else {
        panic!("approve");
    };
    assert!(s.router.is_external_router_approved(AGG));
    let Ok(()) = s
        .router
        .set_external_router_approval(&mut s.events, OWNER, AGG, false)
    else {
        panic!("revoke");
    };
    assert!(!s.router.is_external_router_approved(AGG));
}

#[test]
fn unapproved_external_router_rejected() {
    let mut s = state();
    s.aggregators.insert(AGG, MockAggregator::new(AGG));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let swap = order(lens(1_000), usdt(3_900));
    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_externally_quoted(&mut cx, BOB, &swap),
        Err(EngineError::Unauthorized)
    );
}

#[test]
fn undeployed_external_router_fails() {
    let mut s = state();
    let Ok(()) = s
        .router
        .set_external_router_approval(&mut s.events, OWNER, AGG, true)
    else {
        panic!("approve");
    };
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let swap = order(lens(1_000), usdt(3_900));
    let (router, mut cx) = s.route();
    assert!(matches!(
        router.swap_externally_quoted(&mut cx, BOB, &swap),
        Err(EngineError::ExternalCallFailed(_))
    ));
}

#[test]
fn external_swap_settles_observed_output() {
    let mut s = state();
    with_aggregator(&mut s, MockAggregator::new(AGG));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let mut swap = order(lens(1_000), usdt(3_900));
    swap.min_out = usdt(3_900);
    swap.use_lending = true;

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_externally_quoted(&mut cx, BOB, &swap) else {
        panic!("external swap");
    };

    assert_eq!(out, usdt(3_900));
    assert_eq!(balance(&s, devnet::A_USDT, BOB), usdt(3_900));
    assert_eq!(balance(&s, devnet::LENS, AGG), lens(1_000));
    assert_eq!(s.ledgers.allowance(devnet::LENS, devnet::ROUTER, AGG), Ok(Amount::ZERO));
    assert!(router_is_empty(&s));
}

#[test]
fn short_paying_aggregator_rejected() {
    let mut s = state();
    with_aggregator(&mut s, MockAggregator::new(AGG).with_haircut(BasisPoints::new(100)));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let mut swap = order(lens(1_000), usdt(3_900));
    swap.min_out = usdt(3_900);

    let (router, mut cx) = s.route();
    assert_eq!(
        router.swap_externally_quoted(&mut cx, BOB, &swap),
        Err(EngineError::SlippageExceeded {
            min_out: usdt(3_900),
            actual: usdt(3_861),
        })
    );
}

#[test]
fn unspent_input_refunded() {
    let mut s = state();
    with_aggregator(&mut s, MockAggregator::new(AGG));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let swap = order(lens(600), usdt(2_000));

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_externally_quoted(&mut cx, BOB, &swap) else {
        panic!("external swap");
    };

    assert_eq!(out, usdt(2_000));
    assert_eq!(balance(&s, devnet::USDT, BOB), usdt(2_000));
    assert_eq!(balance(&s, devnet::LENS, BOB), lens(9_400));
    assert!(router_is_empty(&s));
}

#[test]
fn overspending_payload_cannot_exceed_approval() {
    let mut s = state();
    with_aggregator(&mut s, MockAggregator::new(AGG));
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));
    let swap = order(lens(1_001), usdt(2_000));
    let (router, mut cx) = s.route();
    assert!(matches!(
        router.swap_externally_quoted(&mut cx, BOB, &swap),
        Err(EngineError::ExternalCallFailed(_))
    ));
}

#[test]
fn quote_entry_point_ignores_to_amount() {
    let mut s = state();
    let agg = MockAggregator::new(AGG);
    let Ok(mut quote) = agg.quote(&AggregatorOrder {
        token_in: devnet::LENS,
        token_out: devnet::USDT,
        amount_in: lens(1_000),
        amount_out: usdt(3_900),
    }) else {
        panic!("quote");
    };
    quote.to_amount = "999999999999".to_owned();
    with_aggregator(&mut s, agg);
    approve(&mut s, devnet::LENS, BOB, devnet::ROUTER, lens(1_000));

    let (router, mut cx) = s.route();
    let Ok(out) = router.swap_with_quote(&mut cx, BOB, &quote, lens(1_000), Amount::ZERO, false)
    else {
        panic!("quoted swap");
    };
    assert_eq!(out, usdt(3_900));
}
