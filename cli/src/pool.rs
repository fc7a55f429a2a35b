//! Simulated liquidity pool: seeding, pair registration, quotes

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use reservoir::{Address, Amount, ReserveAsset};

use crate::config::Session;
use crate::units::format_amount;

/// Controller moves `tokens` into the pair, the faucet adds `reserve`, then
/// the venue adopts the pair's balances as its reserves.
pub async fn seed(session: &Session, tokens: Amount, reserve: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let controller = state.contract.controller();
    let pair = state.contract.venue().pair();

    println!("{}", "=== Seeding Pool ===".bright_green().bold());
    println!("{} {}", "Pair:".bright_cyan(), pair);

    if tokens > 0 {
        let call = state.call(controller);
        state
            .contract
            .transfer(call, pair, tokens)
            .context("Controller could not fund the pair")?;
    }
    if reserve > 0 {
        state
            .contract
            .reserve_mut()
            .mint(&pair, reserve)
            .map_err(|e| anyhow!("Reserve mint failed: {e}"))?;
    }

    let token_balance = state.contract.balance_of(&pair);
    let reserve_balance = state.contract.reserve().balance_of(&pair);
    state.contract.venue_mut().sync(token_balance, reserve_balance);
    session.save_state(&state)?;

    println!("{} {}", "Token Reserve:".bright_cyan(), format_amount(token_balance));
    println!("{} {}", "Asset Reserve:".bright_cyan(), format_amount(reserve_balance));
    println!("\n{} Pool synced", "✓".green());
    Ok(())
}

pub async fn set_pair(session: &Session, caller: Address, pair: Option<Address>) -> Result<()> {
    let mut state = session.load_state()?;
    let pair = pair.unwrap_or_else(|| state.contract.venue().pair());

    let cap = state.contract.authorize_controller(&caller)?;
    state.contract.set_pair_address(&cap, pair)?;
    session.save_state(&state)?;

    println!("{} Pair set to {}", "✓".green(), pair);
    Ok(())
}

pub async fn quote(session: &Session, amount: Amount) -> Result<()> {
    let state = session.load_state()?;
    let venue = state.contract.venue();
    let (reserve_a, reserve_b) = venue.reserves();

    println!("{}", "=== Swap Quote ===".bright_green().bold());
    println!("{} {}", "Amount In:".bright_cyan(), format_amount(amount));
    println!(
        "{} {} / {}",
        "Pool Reserves:".bright_cyan(),
        format_amount(reserve_a),
        format_amount(reserve_b)
    );

    match venue.quote(amount) {
        Ok(out) => println!("{} {}", "Venue Output:".bright_cyan(), format_amount(out)),
        Err(e) => println!("{} {}", "Venue Output:".bright_cyan(), e.to_string().yellow()),
    }
    match state.contract.swap_bound(amount) {
        Ok(bound) => println!("{} {}", "Minimum Accepted:".bright_cyan(), format_amount(bound)),
        Err(e) => println!("{} {}", "Minimum Accepted:".bright_cyan(), e.to_string().yellow()),
    }
    Ok(())
}
