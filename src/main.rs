//! Hindsight - What-If Drawdown Analyzer for Solana Meme Coins
//!
//! Discovers meme tokens on CoinGecko, ranks them by decline from their
//! all-time high, and simulates a fixed investment near the peak: sold at
//! the top versus held until today.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use hindsight::adapters::cli::{CliApp, Command, DiscoverCmd, RunCmd};
use hindsight::adapters::coingecko::CoinGeckoClient;
use hindsight::adapters::report;
use hindsight::application::AnalysisPipeline;
use hindsight::config::{load_config_or_default, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API key goes here, not in config files)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Discover(cmd) => discover_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("hindsight=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).init();
}

fn load(cmd_config: &std::path::Path) -> Result<Config> {
    let path = shellexpand::tilde(&cmd_config.to_string_lossy().into_owned()).into_owned();
    let config = load_config_or_default(&path).context("Failed to load configuration")?;
    Ok(config)
}

async fn run_command(cmd: RunCmd) -> Result<()> {
    let config = load(&cmd.config)?;

    tracing::info!("Let's take a look at the biggest losers among SOL meme coins.");
    tracing::info!(
        "Every API call is padded with a {}ms pause, so this takes a while.",
        config.provider.request_delay_ms
    );

    let client = CoinGeckoClient::new(&config).context("Failed to create CoinGecko client")?;
    let pipeline = AnalysisPipeline::new(client, config.clone());

    let results = pipeline.run().await.context("Analysis run failed")?;
    report::present(&results, config.analysis.investment_amount).await;

    Ok(())
}

async fn discover_command(cmd: DiscoverCmd) -> Result<()> {
    let config = load(&cmd.config)?;

    let client = CoinGeckoClient::new(&config).context("Failed to create CoinGecko client")?;
    let pipeline = AnalysisPipeline::new(client, config.clone());

    let candidates = pipeline.discover().await.context("Discovery failed")?;
    if candidates.is_empty() {
        println!(
            "No tokens in \"{}\" match \"{}\".",
            config.discovery.category, config.discovery.name_marker
        );
        return Ok(());
    }

    println!(
        "{} candidates in \"{}\" match \"{}\":",
        candidates.len(),
        config.discovery.category,
        config.discovery.name_marker
    );
    for candidate in &candidates {
        println!(
            "  {:<12} {} ({})",
            candidate.symbol.to_uppercase(),
            candidate.name,
            candidate.id
        );
    }

    Ok(())
}
