//! Externally quoted swap through an allowlisted aggregator.
//!
//! Builds a quote in the shape the quote service returns, runs it through
//! the router with a lending deposit, and then shows that an aggregator
//! paying less than the caller's minimum is rejected no matter what its
//! quote claimed.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example aggregator_route
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

    println!("=== Aggregator Route ===\n");

    let owner = Address::from_low_u64(0xA11CE);
    let user = Address::from_low_u64(0xB0B);
    let honest = Address::from_low_u64(0x5001);
    let shady = Address::from_low_u64(0x5002);
    let mut engine: Engine = Engine::new(EngineConfig::devnet(owner)?)?;

    // ── 1. Deploy and allowlist two aggregators ─────────────────────────
    engine.register_aggregator(MockAggregator::new(honest))?;
    engine.register_aggregator(MockAggregator::new(shady).with_haircut(BasisPoints::new(200)))?;
    for aggregator in [honest, shady] {
        engine.set_external_router_approval(owner, aggregator, true)?;
        engine.transfer(owner, devnet::USDT, aggregator, units(50_000, 6)?)?;
    }
    engine.transfer(owner, devnet::LENS, user, units(2_000, 18)?)?;

    let order = AggregatorOrder {
        token_in: devnet::LENS,
        token_out: devnet::USDT,
        amount_in: units(1_000, 18)?,
        amount_out: units(3_900, 6)?,
    };

    // ── 2. Honest fill, deposited ───────────────────────────────────────
    let quote = MockAggregator::new(honest).quote(&order)?;
    println!("Quote: {}", serde_json::to_string(&quote)?);
    engine.approve(user, devnet::LENS, devnet::ROUTER, order.amount_in)?;
    let received = engine.swap_with_quote(user, &quote, order.amount_in, order.amount_out, true)?;
    println!("Received {received} raw USDT as receipts: {}", engine.receipt_balance(user)?);

    // ── 3. Short-paying fill, rejected ──────────────────────────────────
    let quote = MockAggregator::new(shady).quote(&order)?;
    println!("Shady quote claims toAmount = {}", quote.to_amount);
    engine.approve(user, devnet::LENS, devnet::ROUTER, order.amount_in)?;
    match engine.swap_with_quote(user, &quote, order.amount_in, order.amount_out, true) {
        Err(e) => println!("Rejected: {e}"),
        Ok(out) => return Err(format!("short fill of {out} accepted").into()),
    }
    println!(
        "User still holds {} raw LENS",
        engine.balance_of(devnet::LENS, user)?
    );

    Ok(())
}
