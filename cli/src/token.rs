//! Ledger token operations

use anyhow::Result;
use colored::Colorize;
use reservoir::{Address, Amount, TransferKind, TransferReceipt};

use crate::config::Session;
use crate::units::{format_amount, format_bps};

pub async fn info(session: &Session) -> Result<()> {
    let state = session.load_state()?;
    let c = &state.contract;
    let params = c.config().params;

    println!("{}", "=== Token Info ===".bright_green().bold());
    println!("{} {}", "Name:".bright_cyan(), c.name());
    println!("{} {}", "Symbol:".bright_cyan(), c.symbol());
    println!("{} {}", "Decimals:".bright_cyan(), c.decimals());
    println!("{} {}", "Total Supply:".bright_cyan(), format_amount(c.total_supply()));
    println!("{} {}", "Holders:".bright_cyan(), c.ledger().holders());
    println!("{} {}", "Controller:".bright_cyan(), c.controller());
    println!("{} {}", "Contract:".bright_cyan(), c.address());
    if c.pair().is_zero() {
        println!("{} {}", "Pair:".bright_cyan(), "unset".yellow());
    } else {
        println!("{} {}", "Pair:".bright_cyan(), c.pair());
    }

    println!("\n{}", "Parameters:".bright_yellow());
    println!("  {} {}", "Fee:".bright_cyan(), format_bps(params.fee_bps));
    println!("  {} {}", "Min Fee:".bright_cyan(), format_amount(params.min_fee));
    println!("  {} {}", "Min Transfer:".bright_cyan(), format_amount(params.min_transfer));
    println!("  {} {}", "Min Liquidity:".bright_cyan(), format_amount(params.min_liquidity));
    println!("  {} {}%", "Min Swap Output:".bright_cyan(), params.min_output_percent);
    println!("  {} {}s", "Issuance Window:".bright_cyan(), params.issuance_window_secs);
    Ok(())
}

pub async fn balance(session: &Session, account: Address) -> Result<()> {
    let state = session.load_state()?;
    let balance = state.contract.balance_of(&account);
    println!(
        "{} {} {}",
        "Balance:".bright_cyan(),
        format_amount(balance),
        state.contract.symbol()
    );
    Ok(())
}

pub async fn transfer(session: &Session, from: Address, to: Address, amount: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(from);
    let receipt = state.contract.transfer(call, to, amount)?;
    session.save_state(&state)?;

    print_receipt(&receipt);
    Ok(())
}

pub async fn approve(session: &Session, owner: Address, spender: Address, amount: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(owner);
    state.contract.approve(call, spender, amount)?;
    session.save_state(&state)?;

    println!(
        "{} {} may spend {} of {}",
        "✓".green(),
        spender,
        format_amount(amount),
        owner
    );
    Ok(())
}

pub async fn transfer_from(
    session: &Session,
    spender: Address,
    from: Address,
    to: Address,
    amount: Amount,
) -> Result<()> {
    let mut state = session.load_state()?;
    let call = state.call(spender);
    let receipt = state.contract.transfer_from(call, from, to, amount)?;
    session.save_state(&state)?;

    print_receipt(&receipt);
    Ok(())
}

fn print_receipt(receipt: &TransferReceipt) {
    println!("{}", "=== Transfer ===".bright_green().bold());
    println!("{} {}", "From:".bright_cyan(), receipt.from);
    println!("{} {}", "To:".bright_cyan(), receipt.to);
    println!("{} {}", "Amount:".bright_cyan(), format_amount(receipt.amount));

    match receipt.kind {
        TransferKind::Exempt(exemption) => {
            println!("{} exempt ({:?})", "Fee:".bright_cyan(), exemption);
        }
        TransferKind::Waived => {
            println!("{} waived (below floor)", "Fee:".bright_cyan());
        }
        TransferKind::Taxed(split) => {
            println!("{} {}", "Fee:".bright_cyan(), format_amount(split.fee));
            println!("  {} {}", "Burned:".bright_cyan(), format_amount(split.burn));
            println!("  {} {}", "To Controller:".bright_cyan(), format_amount(split.controller));
            println!("  {} {}", "Swapped:".bright_cyan(), format_amount(split.swap));
            println!(
                "  {} {}",
                "Reserve Received:".bright_cyan(),
                format_amount(receipt.reserve_received)
            );
        }
    }

    println!("{} {}", "Net:".bright_cyan(), format_amount(receipt.net));
    println!("\n{} Transfer complete", "✓".green());
}
