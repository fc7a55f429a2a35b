//! Faucet and allowances for the simulated reserve asset

use anyhow::{anyhow, Result};
use colored::Colorize;
use reservoir::{Address, Amount, ReserveAsset};

use crate::config::Session;
use crate::units::format_amount;

pub async fn mint(session: &Session, to: Address, amount: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    state
        .contract
        .reserve_mut()
        .mint(&to, amount)
        .map_err(|e| anyhow!("Reserve mint failed: {e}"))?;
    session.save_state(&state)?;

    println!("{} Minted {} reserve to {}", "✓".green(), format_amount(amount), to);
    Ok(())
}

/// Let the contract pull `amount` of reserve from `owner`
pub async fn approve(session: &Session, owner: Address, amount: Amount) -> Result<()> {
    let mut state = session.load_state()?;
    let contract = state.contract.address();
    state.contract.reserve_mut().approve(&owner, &contract, amount);
    session.save_state(&state)?;

    println!(
        "{} Contract may pull {} reserve from {}",
        "✓".green(),
        format_amount(amount),
        owner
    );
    Ok(())
}

pub async fn balance(session: &Session, account: Address) -> Result<()> {
    let state = session.load_state()?;
    let reserve = state.contract.reserve();
    let contract = state.contract.address();

    println!("{} {}", "Reserve Balance:".bright_cyan(), format_amount(reserve.balance_of(&account)));
    println!(
        "{} {}",
        "Allowance To Contract:".bright_cyan(),
        format_amount(reserve.allowance(&account, &contract))
    );
    Ok(())
}
