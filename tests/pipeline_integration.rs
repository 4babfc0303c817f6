//! Analysis Pipeline Integration Tests
//!
//! End-to-end runs of the acquisition pipeline against the scripted
//! provider:
//! 1. Discovery -> enrichment -> selection -> metric computation flow
//! 2. Per-item failure isolation (detail and history fetches)
//! 3. Entry-price ceiling and loss invariants on the final records
//!
//! All tests are deterministic and make no real network calls; the scripted
//! provider has no pacing, so they run instantly.

use approx::assert_relative_eq;

use hindsight::application::{AnalysisPipeline, PipelineError};
use hindsight::config::Config;
use hindsight::domain::ranking::decline_from_high;
use hindsight::ports::market_data::{CoinDetailRecord, ListingEntry};
use hindsight::ports::mocks::ScriptedMarketData;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Create a listing entry whose name carries the "meme" marker
fn meme_listing(id: &str) -> ListingEntry {
    ListingEntry {
        id: id.to_string(),
        name: format!("{id} meme"),
        symbol: id.to_string(),
    }
}

/// Create a detail record with the given ATH and current price
fn detail(id: &str, ath: f64, current: f64) -> CoinDetailRecord {
    CoinDetailRecord {
        id: id.to_string(),
        name: format!("{id} meme"),
        symbol: id.to_string(),
        ath_usd: Some(ath),
        ath_date: None,
        current_price_usd: Some(current),
        solana_address: Some(format!("{id}111111111111111111111111111111111111111111")),
    }
}

/// Script a full provider for tokens with ATH 100 and the given declines.
/// Every token gets a chart whose earliest price is 10.
fn scripted_market(declines: &[(&str, f64)]) -> ScriptedMarketData {
    let mut provider =
        ScriptedMarketData::new().with_listing(declines.iter().map(|(id, _)| meme_listing(id)).collect());

    for (id, decline) in declines {
        provider = provider
            .with_detail(detail(id, 100.0, 100.0 - decline))
            .with_chart(id, vec![(1_000, 10.0), (2_000, 12.0), (3_000, 8.0)]);
    }

    provider
}

// ============================================================================
// Full-run behavior
// ============================================================================

#[tokio::test]
async fn full_run_selects_ranks_and_computes() {
    // declines [80, 50, 90] with threshold 70 -> [90, 80], 50 excluded
    let provider = scripted_market(&[("alpha", 80.0), ("beta", 50.0), ("gamma", 90.0)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();

    let symbols: Vec<&str> = results.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["GAMMA", "ALPHA"]);

    // earliest historical price 10 sits below the 25-of-ATH ceiling
    assert_relative_eq!(results[0].buying_price, 10.0);
    assert_relative_eq!(results[0].ath, 100.0);
    assert_relative_eq!(results[0].current_price, 10.0);
}

#[tokio::test]
async fn below_threshold_tokens_never_reach_metric_computation() {
    let provider = scripted_market(&[("alpha", 80.0), ("beta", 50.0), ("gamma", 90.0)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    pipeline.run().await.unwrap();

    let calls = pipeline.provider().calls();
    assert!(!calls.contains(&"chart:beta".to_string()));
}

#[tokio::test]
async fn calls_follow_stage_order_one_item_at_a_time() {
    let provider = scripted_market(&[("alpha", 80.0), ("beta", 50.0), ("gamma", 90.0)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    pipeline.run().await.unwrap();

    // enrichment in listing order, charts in descending-decline order
    assert_eq!(
        pipeline.provider().calls(),
        vec![
            "listing",
            "detail:alpha",
            "detail:beta",
            "detail:gamma",
            "chart:gamma",
            "chart:alpha",
        ]
    );
}

#[tokio::test]
async fn identical_scripts_produce_identical_results() {
    let first = AnalysisPipeline::new(
        scripted_market(&[("alpha", 80.0), ("gamma", 90.0)]),
        Config::default(),
    );
    let second = AnalysisPipeline::new(
        scripted_market(&[("alpha", 80.0), ("gamma", 90.0)]),
        Config::default(),
    );

    assert_eq!(first.run().await.unwrap(), second.run().await.unwrap());
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn listing_failure_aborts_the_run() {
    let provider = ScriptedMarketData::new().with_failing_listing();
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, PipelineError::Discovery(_)));
}

#[tokio::test]
async fn detail_failure_skips_that_candidate_only() {
    let provider =
        scripted_market(&[("alpha", 80.0), ("gamma", 90.0)]).with_failing_detail("alpha");
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    let symbols: Vec<&str> = results.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["GAMMA"]);
}

#[tokio::test]
async fn history_failure_drops_only_that_token() {
    let provider =
        scripted_market(&[("alpha", 80.0), ("gamma", 90.0)]).with_failing_chart("gamma");
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    let symbols: Vec<&str> = results.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["ALPHA"]);
}

// ============================================================================
// Metric invariants on the final records
// ============================================================================

#[tokio::test]
async fn entry_price_never_exceeds_the_ceiling() {
    // earliest 40 is above the cap of 25, earliest 10 is below it
    let provider = ScriptedMarketData::new()
        .with_listing(vec![meme_listing("capped"), meme_listing("floored")])
        .with_detail(detail("capped", 100.0, 10.0))
        .with_chart("capped", vec![(1_000, 40.0)])
        .with_detail(detail("floored", 100.0, 10.0))
        .with_chart("floored", vec![(1_000, 10.0)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    assert_eq!(results.len(), 2);

    for metrics in &results {
        assert!(metrics.buying_price <= metrics.ath * 0.25);
    }
    let capped = results.iter().find(|m| m.symbol == "CAPPED").unwrap();
    let floored = results.iter().find(|m| m.symbol == "FLOORED").unwrap();
    assert_relative_eq!(capped.buying_price, 25.0);
    assert_relative_eq!(floored.buying_price, 10.0);
}

#[tokio::test]
async fn outcome_arithmetic_matches_the_reference_scenario() {
    // ath=100, empty history -> entry at the 25 ceiling; 1000 buys 40 tokens
    let provider = ScriptedMarketData::new()
        .with_listing(vec![meme_listing("token")])
        .with_detail(detail("token", 100.0, 10.0))
        .with_chart("token", vec![]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    let metrics = &results[0];

    assert_relative_eq!(metrics.buying_price, 25.0);
    assert_relative_eq!(metrics.potential_earnings_ath, 4_000.0);
    assert_relative_eq!(metrics.potential_chemo_sessions, 4_000.0 / 6_000.0);
    assert_relative_eq!(metrics.current_value, 400.0);
    assert_relative_eq!(metrics.loss, -600.0);
}

#[tokio::test]
async fn decline_agrees_between_ranking_and_metric_computation() {
    let provider = scripted_market(&[("alpha", 87.5), ("gamma", 91.25)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    for metrics in &results {
        assert_relative_eq!(
            metrics.ath_drop_percentage,
            decline_from_high(metrics.ath, metrics.current_price),
            epsilon = 1e-9
        );
    }
    assert_relative_eq!(results[0].ath_drop_percentage, 91.25);
    assert_relative_eq!(results[1].ath_drop_percentage, 87.5);
}

#[tokio::test]
async fn loss_is_clamped_to_zero_when_in_profit() {
    // entry at 0.001 and a current price of 25 leaves the position deep in
    // profit even after a 75% drawdown from the ATH
    let provider = ScriptedMarketData::new()
        .with_listing(vec![meme_listing("winner"), meme_listing("loser")])
        .with_detail(detail("winner", 100.0, 25.0))
        .with_chart("winner", vec![(1_000, 0.001)])
        .with_detail(detail("loser", 100.0, 1.0))
        .with_chart("loser", vec![(1_000, 20.0)]);
    let pipeline = AnalysisPipeline::new(provider, Config::default());

    let results = pipeline.run().await.unwrap();
    let winner = results.iter().find(|m| m.symbol == "WINNER").unwrap();
    let loser = results.iter().find(|m| m.symbol == "LOSER").unwrap();

    assert!(winner.current_value > 1_000.0);
    assert_eq!(winner.loss, 0.0);

    assert!(loser.current_value < 1_000.0);
    assert!(loser.loss < 0.0);
    assert_relative_eq!(loser.loss, loser.current_value - 1_000.0);
}
