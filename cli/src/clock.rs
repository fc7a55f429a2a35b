//! Simulated block time

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Session;

pub async fn show(session: &Session) -> Result<()> {
    let state = session.load_state()?;
    let status = state.contract.issuance_status(state.now)?;

    println!("{}", "=== Clock ===".bright_green().bold());
    println!("{} {}", "Now:".bright_cyan(), state.now);
    println!("{} {}", "Deployed At:".bright_cyan(), state.contract.config().deployed_at);
    println!("{} {}", "Issuance Ends:".bright_cyan(), status.ends_at);
    Ok(())
}

pub async fn advance(session: &Session, secs: u64) -> Result<()> {
    let mut state = session.load_state()?;
    state.now = state
        .now
        .checked_add(secs)
        .context("Clock overflow")?;
    session.save_state(&state)?;

    println!("{} Clock advanced by {}s to {}", "✓".green(), secs, state.now);
    Ok(())
}
