use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "stocklens")]
#[command(about = "Market CSV toolkit: pull feeds, analyze trades, serve the API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull CSV exports from the configured feed
    Pull,
    /// Compute trade analytics from the local ledger
    Analyze,
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8686")]
        port: u16,
    },
    /// Show local dataset status
    Status,
    /// Manage the watchlist
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },
}

#[derive(Subcommand)]
pub enum WatchAction {
    /// Start watching a symbol
    Add {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
    },
    /// Stop watching a symbol
    Remove {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
    },
    /// List watched symbols
    List,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pull => {
            commands::pull::run().await;
        }
        Commands::Analyze => {
            commands::analyze::run();
        }
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Status => {
            commands::status::run();
        }
        Commands::Watch { action } => {
            commands::watch::run(action).await;
        }
    }
}
