//! CLI Adapter
//!
//! Command-line interface for the Hindsight analyzer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hindsight - What-If Drawdown Analyzer for Solana Meme Coins
#[derive(Parser, Debug)]
#[command(
    name = "hindsight",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "What-if drawdown analyzer for Solana meme coins",
    long_about = "Hindsight discovers meme tokens in the Solana ecosystem, ranks them by \
                  decline from their all-time high, and simulates what a fixed investment \
                  near the peak would be worth today versus sold at the top."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis and print the two reports
    Run(RunCmd),

    /// Run discovery only and list the matching candidates
    Discover(DiscoverCmd),
}

/// Run the full analysis
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file (built-in defaults when absent)
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,
}

/// List discovered candidates without enriching them
#[derive(Parser, Debug)]
pub struct DiscoverCmd {
    /// Path to configuration file (built-in defaults when absent)
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,
}
