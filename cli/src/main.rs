//! Reservoir CLI - host simulator for the taxed reserve token
//!
//! Persists the whole contract in a JSON state file and drives every
//! operation against it, with a simulated clock and a simulated venue.

use clap::{Parser, Subcommand};
use colored::Colorize;
use reservoir::{Address, Amount};
use std::path::PathBuf;

mod clock;
mod config;
mod deploy;
mod keeper;
mod pool;
mod report;
mod reserve;
mod state;
mod token;
mod units;
mod vault;

use config::{CliConfig, Session};
use units::parse_amount;

#[derive(Parser)]
#[command(name = "reservoir")]
#[command(about = "Reservoir CLI - simulate the taxed reserve token and its vaults", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State file (overrides the config)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a fresh contract into the state file
    Init {
        /// Controller address (base58 or @label)
        #[arg(long)]
        controller: Address,

        /// Supply minted to the controller
        #[arg(long, default_value = "1000000", value_parser = parse_amount)]
        initial_supply: Amount,

        /// Deployment time in seconds; the clock starts here
        #[arg(long, default_value = "0")]
        deployed_at: u64,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Simulated clock
    Clock {
        #[command(subcommand)]
        command: ClockCommands,
    },

    /// Ledger token operations
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Simulated reserve asset
    Reserve {
        #[command(subcommand)]
        command: ReserveCommands,
    },

    /// Liquidity pool operations
    Pool {
        #[command(subcommand)]
        command: PoolCommands,
    },

    /// Issuance and redemption
    Vault {
        #[command(subcommand)]
        command: VaultCommands,
    },

    /// Reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Keeper operations
    Keeper {
        #[command(subcommand)]
        command: KeeperCommands,
    },
}

#[derive(Subcommand)]
enum ClockCommands {
    /// Show the current time and the issuance deadline
    Show,

    /// Move the clock forward
    Advance {
        /// Seconds to advance
        secs: u64,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Token metadata, supply and parameters
    Info,

    /// Show an account balance
    Balance {
        account: Address,
    },

    /// Transfer tokens (taxed unless exempt)
    Transfer {
        #[arg(long)]
        from: Address,

        #[arg(long)]
        to: Address,

        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },

    /// Set an allowance
    Approve {
        #[arg(long)]
        owner: Address,

        #[arg(long)]
        spender: Address,

        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },

    /// Transfer on behalf of an owner
    TransferFrom {
        #[arg(long)]
        spender: Address,

        #[arg(long)]
        from: Address,

        #[arg(long)]
        to: Address,

        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },
}

#[derive(Subcommand)]
enum ReserveCommands {
    /// Faucet: mint reserve asset to an account
    Mint {
        to: Address,

        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },

    /// Allow the contract to pull reserve asset from an owner
    Approve {
        #[arg(long)]
        owner: Address,

        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },

    /// Show a reserve balance and the allowance to the contract
    Balance {
        account: Address,
    },
}

#[derive(Subcommand)]
enum PoolCommands {
    /// Fund the pair from the controller and the faucet, then sync
    Seed {
        /// Ledger tokens moved from the controller
        #[arg(long, value_parser = parse_amount)]
        tokens: Amount,

        /// Reserve asset minted to the pair
        #[arg(long, value_parser = parse_amount)]
        reserve: Amount,
    },

    /// Register the pair with the contract (controller only)
    SetPair {
        #[arg(long)]
        caller: Address,

        /// Pair address (defaults to the simulated pool)
        #[arg(long)]
        pair: Option<Address>,
    },

    /// Venue output and the minimum the contract would accept
    Quote {
        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },
}

#[derive(Subcommand)]
enum VaultCommands {
    /// Deposit reserve asset for shares
    Issue {
        #[arg(long)]
        caller: Address,

        #[arg(value_parser = parse_amount)]
        deposit: Amount,
    },

    /// Burn shares for reserve asset
    Redeem {
        #[arg(long)]
        caller: Address,

        #[arg(value_parser = parse_amount)]
        shares: Amount,
    },

    /// Burn the contract's own token balance
    Sweep {
        #[arg(long)]
        caller: Address,
    },

    /// Quote an issuance without executing it
    PreviewIssue {
        #[arg(value_parser = parse_amount)]
        deposit: Amount,
    },

    /// Quote a redemption without executing it
    PreviewRedeem {
        #[arg(value_parser = parse_amount)]
        shares: Amount,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Supply, reserve and backing
    Metrics,

    /// Issuance window status
    Status,

    /// Emitted events
    Events {
        /// Only the most recent N
        #[arg(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand)]
enum KeeperCommands {
    /// Run the keeper loop
    Run {
        /// Account credited as the sweep caller
        #[arg(long, default_value = "@keeper")]
        caller: Address,

        /// Seconds between checks
        #[arg(short, long, default_value = "10")]
        interval: u64,

        /// Report only, never burn
        #[arg(long)]
        monitor_only: bool,

        /// Stop after N checks
        #[arg(long)]
        iterations: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    let session = Session::new(config, cli.state.as_deref(), cli.verbose);

    if session.verbose {
        println!("{} {}", "State File:".bright_cyan(), session.state_path.display());
        println!("{} {}", "Venue Fee:".bright_cyan(), units::format_bps(session.config.venue_fee_bps.into()));
    }

    match cli.command {
        Commands::Init { controller, initial_supply, deployed_at, force } => {
            deploy::init(&session, controller, initial_supply, deployed_at, force).await?;
        }
        Commands::Clock { command } => match command {
            ClockCommands::Show => clock::show(&session).await?,
            ClockCommands::Advance { secs } => clock::advance(&session, secs).await?,
        },
        Commands::Token { command } => match command {
            TokenCommands::Info => token::info(&session).await?,
            TokenCommands::Balance { account } => token::balance(&session, account).await?,
            TokenCommands::Transfer { from, to, amount } => {
                token::transfer(&session, from, to, amount).await?;
            }
            TokenCommands::Approve { owner, spender, amount } => {
                token::approve(&session, owner, spender, amount).await?;
            }
            TokenCommands::TransferFrom { spender, from, to, amount } => {
                token::transfer_from(&session, spender, from, to, amount).await?;
            }
        },
        Commands::Reserve { command } => match command {
            ReserveCommands::Mint { to, amount } => reserve::mint(&session, to, amount).await?,
            ReserveCommands::Approve { owner, amount } => reserve::approve(&session, owner, amount).await?,
            ReserveCommands::Balance { account } => reserve::balance(&session, account).await?,
        },
        Commands::Pool { command } => match command {
            PoolCommands::Seed { tokens, reserve } => pool::seed(&session, tokens, reserve).await?,
            PoolCommands::SetPair { caller, pair } => pool::set_pair(&session, caller, pair).await?,
            PoolCommands::Quote { amount } => pool::quote(&session, amount).await?,
        },
        Commands::Vault { command } => match command {
            VaultCommands::Issue { caller, deposit } => vault::issue(&session, caller, deposit).await?,
            VaultCommands::Redeem { caller, shares } => vault::redeem(&session, caller, shares).await?,
            VaultCommands::Sweep { caller } => vault::sweep(&session, caller).await?,
            VaultCommands::PreviewIssue { deposit } => vault::preview_issue(&session, deposit).await?,
            VaultCommands::PreviewRedeem { shares } => vault::preview_redeem(&session, shares).await?,
        },
        Commands::Report { command } => match command {
            ReportCommands::Metrics => report::metrics(&session).await?,
            ReportCommands::Status => report::status(&session).await?,
            ReportCommands::Events { last } => report::events(&session, last).await?,
        },
        Commands::Keeper { command } => match command {
            KeeperCommands::Run { caller, interval, monitor_only, iterations } => {
                keeper::run_keeper(&session, caller, interval, monitor_only, iterations).await?;
            }
        },
    }

    Ok(())
}
