//! Platform token → wrapped native → stable → lending deposit.
//!
//! Seeds the two pools, sells LENS through both hops, and deposits the
//! stable output into the lending pool, which mints receipt tokens 1:1.
//! Then shows a slippage bound that cannot be met rolling the whole route
//! back.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=lens_engine=debug cargo run --example lending_route
//! ```

use lens_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn units(whole: u128, decimals: u8) -> Result<Amount, Box<dyn std::error::Error>> {
    Ok(Amount::units(whole, decimals).ok_or("amount overflow")?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== LENS → WETH → USDT → Lending ===\n");

    let owner = Address::from_low_u64(0xA11CE);
    let user = Address::from_low_u64(0xB0B);
    let mut engine: Engine = Engine::new(EngineConfig::devnet(owner)?)?;

    // ── 1. Seed pools ───────────────────────────────────────────────────
    let weth_total = units(10_200, 18)?;
    engine.wrap(owner, weth_total)?;
    engine.approve(owner, devnet::LENS, devnet::AMM, units(500_000, 18)?)?;
    engine.approve(owner, devnet::WETH, devnet::AMM, weth_total)?;
    engine.approve(owner, devnet::USDT, devnet::AMM, units(400_000, 6)?)?;
    engine.initialize_pair(
        owner,
        PairSeed::new(devnet::LENS, devnet::WETH, units(500_000, 18)?, units(10_000, 18)?),
    )?;
    engine.initialize_pair(
        owner,
        PairSeed::new(devnet::WETH, devnet::USDT, units(200, 18)?, units(400_000, 6)?),
    )?;
    for pair in engine.pairs() {
        println!("Seeded {pair}");
    }

    // ── 2. Quote the route ──────────────────────────────────────────────
    let amount_in = units(1_000, 18)?;
    let mid = engine.get_amount_out(devnet::LENS, devnet::WETH, amount_in)?;
    let quoted = engine.get_amount_out(devnet::WETH, devnet::USDT, mid)?;
    println!("1000 LENS → {mid} raw WETH → {quoted} raw USDT");

    // ── 3. Unreachable bound: nothing changes ───────────────────────────
    engine.transfer(owner, devnet::LENS, user, amount_in)?;
    engine.approve(user, devnet::LENS, devnet::ROUTER, amount_in)?;
    let events_before = engine.events().len();
    let too_greedy = quoted.checked_add(&Amount::new(1)).ok_or("overflow")?;
    if let Err(e) = engine.deposit_from_platform_token(user, amount_in, Amount::ZERO, too_greedy) {
        println!("Rejected: {e}");
    }
    println!(
        "Events after rollback: {} (was {events_before})",
        engine.events().len()
    );

    // ── 4. Route and deposit ────────────────────────────────────────────
    let deposited = engine.deposit_from_platform_token(user, amount_in, mid, quoted)?;
    println!("Deposited {deposited} raw USDT");
    println!("Receipt balance: {}", engine.receipt_balance(user)?);

    // ── 5. Redeem half ──────────────────────────────────────────────────
    let half = Amount::new(deposited.get() / 2);
    let released = engine.withdraw_from_lending(user, half)?;
    println!(
        "Withdrew {released}; USDT = {}, receipts = {}",
        engine.balance_of(devnet::USDT, user)?,
        engine.receipt_balance(user)?
    );

    Ok(())
}
