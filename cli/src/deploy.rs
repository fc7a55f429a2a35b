//! Contract deployment into a fresh simulation state

use anyhow::{bail, Context, Result};
use colored::Colorize;
use reservoir::{
    Address, Amount, ConstantProductVenue, MemoryReserve, MemoryReservoir, ReserveAsset, Reservoir,
    VaultConfig, VaultParams,
};

use crate::config::{label, CliConfig, Session, CONTRACT_LABEL, PAIR_LABEL, RESERVE_LABEL, ROUTER_LABEL};
use crate::state::SimState;
use crate::units::{format_amount, format_bps};

/// Build the contract, its simulated reserve asset and its venue
pub fn deploy_contract(
    config: &CliConfig,
    controller: Address,
    initial_supply: Amount,
    deployed_at: u64,
) -> Result<MemoryReservoir> {
    let contract = label(CONTRACT_LABEL)?;
    let reserve_id = label(RESERVE_LABEL)?;
    let router = label(ROUTER_LABEL)?;
    let pair = label(PAIR_LABEL)?;

    let mut vault_config = VaultConfig::new(controller, contract, reserve_id, router, deployed_at)
        .with_params(config.params.apply(VaultParams::default()));
    if let Some(name) = &config.token_name {
        vault_config.metadata.name = name.clone();
    }
    if let Some(symbol) = &config.token_symbol {
        vault_config.metadata.symbol = symbol.clone();
    }

    let venue = ConstantProductVenue::new(router, pair, contract, reserve_id)
        .with_fee_bps(u128::from(config.venue_fee_bps));

    Reservoir::new(vault_config, MemoryReserve::new(reserve_id), venue, initial_supply)
        .context("Deployment rejected")
}

pub async fn init(
    session: &Session,
    controller: Address,
    initial_supply: Amount,
    deployed_at: u64,
    force: bool,
) -> Result<()> {
    println!("{}", "=== Deploying Reservoir ===".bright_green().bold());

    if session.state_path.exists() && !force {
        bail!(
            "State file already exists: {}\nPass --force to overwrite it",
            session.state_path.display()
        );
    }

    let contract = deploy_contract(&session.config, controller, initial_supply, deployed_at)?;
    let params = contract.config().params;

    println!("{} {} ({})", "Token:".bright_cyan(), contract.name(), contract.symbol());
    println!("{} {}", "Contract:".bright_cyan(), contract.address());
    println!("{} {}", "Controller:".bright_cyan(), controller);
    println!("{} {}", "Reserve Asset:".bright_cyan(), contract.reserve().id());
    println!("{} {}", "Router:".bright_cyan(), contract.config().swap_venue);
    println!("{} {}", "Initial Supply:".bright_cyan(), format_amount(initial_supply));
    println!("{} {}", "Fee:".bright_cyan(), format_bps(params.fee_bps));
    println!(
        "{} {}",
        "Issuance Ends:".bright_cyan(),
        contract.config().issuance_ends_at()?
    );

    session.save_state(&SimState::new(deployed_at, contract))?;

    println!("\n{} Deployed, state written to {}", "✓".green(), session.state_path.display());
    println!("{}", "Pair is unset: seed the pool and run `pool set-pair`".dimmed());
    Ok(())
}
