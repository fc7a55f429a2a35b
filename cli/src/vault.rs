//! Issuance, redemption and the residue sweep

use anyhow::Result;
use colored::Colorize;
use reservoir::{Address, Amount, IssuanceQuote};

use crate::config::Session;
use crate::units::format_amount;

pub async fn issue(session: &Session, caller: Address, deposit: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(caller);
    let quote = state.contract.issue_shares(call, deposit)?;
    session.save_state(&state)?;

    println!("{}", "=== Shares Issued ===".bright_green().bold());
    print_quote(&quote);
    println!(
        "{} {}",
        "Balance:".bright_cyan(),
        format_amount(state.contract.balance_of(&caller))
    );
    println!("\n{} Issuance complete", "✓".green());
    Ok(())
}

pub async fn preview_issue(session: &Session, deposit: Amount) -> Result<()> {
    let state = session.load_state()?;
    let quote = state.contract.preview_issue(deposit)?;

    println!("{}", "=== Issuance Preview ===".bright_green().bold());
    print_quote(&quote);

    let status = state.contract.issuance_status(state.now)?;
    if !status.active {
        println!("\n{}", "Issuance window has closed".yellow());
    }
    Ok(())
}

pub async fn redeem(session: &Session, caller: Address, shares: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(caller);
    let redemption = state.contract.redeem_shares(call, shares)?;
    session.save_state(&state)?;

    println!("{}", "=== Shares Redeemed ===".bright_green().bold());
    println!("{} {}", "Shares:".bright_cyan(), format_amount(redemption.shares));
    println!("{} {}", "Payout:".bright_cyan(), format_amount(redemption.payout));
    println!("{} {}", "Supply After:".bright_cyan(), format_amount(redemption.supply_after));
    println!("\n{} Redemption complete", "✓".green());
    Ok(())
}

pub async fn preview_redeem(session: &Session, shares: Amount) -> Result<()> {
    let state = session.load_state()?;
    let payout = state.contract.preview_redeem(shares)?;

    println!("{} {}", "Shares:".bright_cyan(), format_amount(shares));
    println!("{} {}", "Payout:".bright_cyan(), format_amount(payout));
    Ok(())
}

pub async fn sweep(session: &Session, caller: Address) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(caller);
    let burned = state.contract.burn_contract_balance(call)?;
    session.save_state(&state)?;

    println!("{} Burned {} of contract residue", "✓".green(), format_amount(burned));
    Ok(())
}

fn print_quote(quote: &IssuanceQuote) {
    println!("{} {}", "Deposit:".bright_cyan(), format_amount(quote.deposit));
    println!("{} {}", "Fee:".bright_cyan(), format_amount(quote.fee));
    println!("  {} {}", "Kept As Backing:".bright_cyan(), format_amount(quote.fee_to_contract));
    println!("  {} {}", "To Controller:".bright_cyan(), format_amount(quote.fee_to_controller));
    println!("{} {}", "Shares:".bright_cyan(), format_amount(quote.shares));
}
