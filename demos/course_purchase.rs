//! Course marketplace walkthrough.
//!
//! An author lists a course, a buyer pays for it in LENS, and the sale is
//! split 95 / 5 between the author and the fee recipient. A second purchase
//! attempt is rejected and costs nothing.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example course_purchase
//! ```

use lens_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn lens(whole: u128) -> Result<Amount, Box<dyn std::error::Error>> {
    Ok(Amount::units(whole, 18).ok_or("amount overflow")?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Course Purchase ===\n");

    // ── 1. Deploy ───────────────────────────────────────────────────────
    let owner = Address::from_low_u64(0xA11CE);
    let author = Address::from_low_u64(0xA07);
    let buyer = Address::from_low_u64(0xB07);
    let mut engine: Engine = Engine::new(EngineConfig::devnet(owner)?)?;
    println!("Marketplace fee: {}", engine.market().fee_bps());

    // ── 2. List a course ────────────────────────────────────────────────
    let price = lens(100)?;
    let id = engine.create_course(author, price, "ipfs://intro-to-amms")?;
    println!("Course {id} listed at {price} raw LENS");

    // ── 3. Fund the buyer and buy ───────────────────────────────────────
    engine.transfer(owner, devnet::LENS, buyer, lens(1_000)?)?;
    engine.approve(buyer, devnet::LENS, devnet::MARKET, price)?;
    let treasury_before = engine.balance_of(devnet::LENS, owner)?;
    engine.buy(buyer, id)?;

    let author_paid = engine.balance_of(devnet::LENS, author)?;
    let fee_paid = engine
        .balance_of(devnet::LENS, owner)?
        .checked_sub(&treasury_before)
        .ok_or("fee recipient balance fell")?;
    println!("Author received:        {author_paid}");
    println!("Fee recipient received: {fee_paid}");
    println!("Buyer has access:       {}", engine.has_access(id, buyer));

    // ── 4. Buying twice is rejected ─────────────────────────────────────
    let before = engine.balance_of(devnet::LENS, buyer)?;
    match engine.buy(buyer, id) {
        Err(e) => println!("Second purchase: {e}"),
        Ok(()) => return Err("second purchase unexpectedly succeeded".into()),
    }
    assert_eq!(engine.balance_of(devnet::LENS, buyer)?, before);

    // ── 5. Deactivate; access survives ──────────────────────────────────
    engine.deactivate_course(author, id)?;
    println!(
        "After deactivation: active = {}, buyer access = {}, sold = {}",
        engine.course(id).is_some_and(Course::is_active),
        engine.has_access(id, buyer),
        engine.sold_count(id)
    );

    Ok(())
}
