//! Saldo CLI - your bank accounts in the terminal

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use saldo_core::Direction;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{accounts, config, login, logout, register, status, transfer, transfers, whoami};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SALDO_LOG";

/// Saldo - your bank accounts in the terminal
#[derive(Parser)]
#[command(name = "saldo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user and sign in
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show session state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
    },

    /// Show the signed-in user's profile
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List bank accounts and balances
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the transfer statement
    Transfers {
        /// Earliest transfer date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest transfer date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Minimum amount
        #[arg(long)]
        min_value: Option<Decimal>,
        /// Maximum amount
        #[arg(long)]
        max_value: Option<Decimal>,
        /// Only sent or received transfers
        #[arg(long)]
        direction: Option<Direction>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Transfers per page
        #[arg(long)]
        per_page: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move money between two of your accounts
    Transfer {
        /// Source account ID
        #[arg(long)]
        from: i64,
        /// Destination account ID
        #[arg(long)]
        to: i64,
        /// Transfer type code
        #[arg(long)]
        transfer_type: i32,
        /// Amount to transfer
        #[arg(long)]
        amount: Decimal,
        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr, filtered by SALDO_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { name, email } => register::run(name, email).await,
        Commands::Login { email } => login::run(email).await,
        Commands::Logout => logout::run(),
        Commands::Status { json } => status::run(json),
        Commands::Config { command } => config::run(command),
        Commands::Whoami { json } => whoami::run(json).await,
        Commands::Accounts { json } => accounts::run(json).await,
        Commands::Transfers {
            start_date,
            end_date,
            min_value,
            max_value,
            direction,
            page,
            per_page,
            json,
        } => {
            let filters = saldo_core::TransferFilters {
                start_date,
                end_date,
                min_value,
                max_value,
                transfer_type: direction,
                per_page,
                page,
            };
            transfers::run(filters, json).await
        }
        Commands::Transfer {
            from,
            to,
            transfer_type,
            amount,
            yes,
        } => transfer::run(from, to, transfer_type, amount, yes).await,
    }
}
