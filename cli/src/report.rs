//! Read-only reports over the simulation state

use anyhow::{Context, Result};
use colored::Colorize;
use reservoir::{Metrics, WAD};

use crate::config::Session;
use crate::units::format_amount;

pub async fn metrics(session: &Session) -> Result<()> {
    let state = session.load_state()?;
    let metrics = state.contract.metrics()?;

    println!("{}", "=== Metrics ===".bright_green().bold());
    print_metrics(&metrics);
    Ok(())
}

pub async fn status(session: &Session) -> Result<()> {
    let state = session.load_state()?;
    let status = state.contract.issuance_status(state.now)?;

    println!("{}", "=== Issuance Status ===".bright_green().bold());
    println!("{} {}", "Now:".bright_cyan(), state.now);
    println!("{} {}", "Ends At:".bright_cyan(), status.ends_at);
    if status.active {
        println!("{} {}", "State:".bright_cyan(), "open".green());
        println!("{} {}s", "Remaining:".bright_cyan(), status.remaining_secs);
    } else {
        println!("{} {}", "State:".bright_cyan(), "closed".red());
    }
    Ok(())
}

pub async fn events(session: &Session, last: Option<usize>) -> Result<()> {
    let state = session.load_state()?;
    let events = state.contract.events();
    let skip = last.map_or(0, |n| events.len().saturating_sub(n));

    println!("{}", "=== Events ===".bright_green().bold());
    if events.is_empty() {
        println!("{}", "(no events)".dimmed());
    }
    for (index, event) in events.iter().enumerate().skip(skip) {
        let body = serde_json::to_string(event).context("Failed to encode event")?;
        println!("{} {} {}", format!("[{index}]").dimmed(), event.name().bright_yellow(), body);
    }
    Ok(())
}

pub fn print_metrics(metrics: &Metrics) {
    println!("{} {}", "Total Supply:".bright_cyan(), format_amount(metrics.total_supply));
    println!("{} {}", "Reserve Held:".bright_cyan(), format_amount(metrics.reserve_balance));
    println!("{} {}", "Total Minted:".bright_cyan(), format_amount(metrics.total_minted));
    println!("{} {}", "Total Burned:".bright_cyan(), format_amount(metrics.total_burned));
    println!("{} {}", "Contract Residue:".bright_cyan(), format_amount(metrics.contract_residue));
    println!(
        "{} {} per {}",
        "Backing:".bright_cyan(),
        format_amount(metrics.backing_ratio),
        format_amount(WAD)
    );
}
