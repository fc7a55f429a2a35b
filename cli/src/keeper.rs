//! Keeper loop: burns contract residue and reports metrics

use anyhow::Result;
use colored::Colorize;
use reservoir::Address;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::Session;
use crate::report::print_metrics;
use crate::units::format_amount;

pub async fn run_keeper(
    session: &Session,
    caller: Address,
    interval_secs: u64,
    monitor_only: bool,
    iterations: Option<u64>,
) -> Result<()> {
    println!("{}", "=== Starting Keeper ===".bright_green().bold());
    println!("{} {}", "Caller:".bright_cyan(), caller);
    println!("{} {}s", "Interval:".bright_cyan(), interval_secs);
    println!("{} {}", "Monitor Only:".bright_cyan(), if monitor_only { "Yes" } else { "No" });

    println!("\n{}", "Keeper is running...".bright_green());
    println!("{}", "(Press Ctrl+C to stop)".dimmed());

    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", "Keeper stopped".yellow());
                break;
            }
        }

        println!(
            "\n{}",
            format!("[{}] Checking contract residue...", chrono::Local::now().format("%H:%M:%S")).dimmed()
        );
        if let Err(e) = tick(session, caller, monitor_only) {
            log::warn!("Keeper tick failed: {e:#}");
            println!("  {} {:#}", "✗".red(), e);
        }

        completed += 1;
        if iterations.is_some_and(|limit| completed >= limit) {
            break;
        }
    }

    Ok(())
}

/// Reload the state so changes made by other invocations are picked up
fn tick(session: &Session, caller: Address, monitor_only: bool) -> Result<()> {
    let mut state = session.load_state()?;
    let residue = state.contract.metrics()?.contract_residue;

    if residue == 0 {
        println!("  {} No residue to burn", "✓".green());
    } else if monitor_only {
        println!("  {} Residue of {} (monitor only)", "ℹ".blue(), format_amount(residue));
    } else {
        let call = state.call(caller);
        let burned = state.contract.burn_contract_balance(call)?;
        session.save_state(&state)?;
        println!("  {} Burned {} of residue", "✓".green(), format_amount(burned));
    }

    print_metrics(&state.contract.metrics()?);
    Ok(())
}
