//! Analysis Pipeline
//!
//! Coordinates the four acquisition/transformation stages against a
//! `MarketDataPort`:
//!
//! 1. Discovery: one listing call, filtered to marker-matching candidates
//! 2. Enrichment: one detail call per candidate, strictly sequential
//! 3. Selection: pure ranking of the enriched records
//! 4. Metric computation: one history call per selected token
//!
//! A stage fully materializes its output before the next begins. Only the
//! listing call is fatal; enrichment and metric failures are logged per item
//! and the run continues with the remaining tokens.

use thiserror::Error;

use crate::config::Config;
use crate::domain::ranking::{decline_from_high, select_top_losers};
use crate::domain::simulation::{entry_price, simulate_outcome};
use crate::domain::token::{CandidateToken, CoinMetrics, EnrichedDetail};
use crate::ports::market_data::{CoinDetailRecord, MarketDataError, MarketDataPort};

/// Per-token metric computation failure. Never propagates past the pipeline;
/// the reason is kept so the per-item diagnostic can name it.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("history fetch failed: {0}")]
    History(#[from] MarketDataError),

    #[error("entry price is not positive, cannot size a position")]
    InvalidEntryPrice,
}

/// Fatal pipeline failure
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("category listing failed: {0}")]
    Discovery(#[from] MarketDataError),
}

/// The acquisition-and-transformation pipeline
pub struct AnalysisPipeline<P> {
    provider: P,
    config: Config,
}

impl<P: MarketDataPort> AnalysisPipeline<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the category listing and keep marker-matching candidates, in
    /// provider order. A listing failure aborts the whole run.
    pub async fn discover(&self) -> Result<Vec<CandidateToken>, MarketDataError> {
        let listing = self.provider.category_listing().await?;
        let total = listing.len();

        let marker = &self.config.discovery.name_marker;
        let candidates: Vec<CandidateToken> = listing
            .into_iter()
            .map(|e| CandidateToken {
                id: e.id,
                name: e.name,
                symbol: e.symbol,
            })
            .filter(|c| c.matches_marker(marker))
            .collect();

        tracing::info!(
            "discovery: {} of {} listed tokens match \"{}\"",
            candidates.len(),
            total,
            marker
        );
        Ok(candidates)
    }

    /// Fetch and flatten the detail record for every candidate, one at a
    /// time. A failing candidate is logged and skipped; the rest of the
    /// batch still completes.
    pub async fn enrich(&self, candidates: Vec<CandidateToken>) -> Vec<EnrichedDetail> {
        let mut enriched = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self.provider.coin_detail(&candidate.id).await {
                Ok(record) => match flatten_detail(record) {
                    Some(detail) => enriched.push(detail),
                    None => {
                        tracing::warn!("skipping {}: detail record has no usable USD quotes", candidate.id)
                    }
                },
                Err(e) => tracing::warn!("skipping {}: detail fetch failed: {e}", candidate.id),
            }
        }

        enriched
    }

    /// Fetch the price history for one selected token and derive its
    /// simulated investment outcome.
    pub async fn compute_metrics(&self, token: &EnrichedDetail) -> Result<CoinMetrics, MetricsError> {
        tracing::info!("processing {}", token.symbol);

        let chart = self.provider.market_chart(&token.id).await?;

        let analysis = &self.config.analysis;
        let buying_price = entry_price(
            token.ath,
            analysis.entry_price_ceiling_pct,
            chart.earliest_price(),
        );
        let outcome = simulate_outcome(
            analysis.investment_amount,
            analysis.monthly_cost_reference,
            buying_price,
            token.ath,
            token.current_price,
        )
        .ok_or(MetricsError::InvalidEntryPrice)?;

        Ok(CoinMetrics {
            name: token.name.clone(),
            symbol: token.symbol.to_uppercase(),
            buying_price,
            ath: token.ath,
            ath_date: token.ath_date,
            potential_earnings_ath: outcome.potential_earnings_ath,
            potential_chemo_sessions: outcome.potential_chemo_sessions,
            ath_drop_percentage: decline_from_high(token.ath, token.current_price),
            current_price: token.current_price,
            current_value: outcome.current_value,
            loss: outcome.loss,
        })
    }

    /// Run the full pipeline: discover, enrich, select, compute.
    pub async fn run(&self) -> Result<Vec<CoinMetrics>, PipelineError> {
        let candidates = self.discover().await?;
        let enriched = self.enrich(candidates).await;

        let selected = select_top_losers(
            enriched,
            self.config.analysis.decline_threshold_pct,
            self.config.analysis.selection_count,
        );
        tracing::info!(
            "selected {} tokens above the {}% decline threshold",
            selected.len(),
            self.config.analysis.decline_threshold_pct
        );

        let mut results = Vec::with_capacity(selected.len());
        for token in &selected {
            match self.compute_metrics(token).await {
                Ok(metrics) => results.push(metrics),
                Err(e) => tracing::warn!("skipping {}: {e}", token.symbol),
            }
        }

        Ok(results)
    }
}

/// Flatten a raw detail record into the normalized shape, recomputing the
/// decline from the USD quotes. Records without a positive ATH and a current
/// price are unusable.
fn flatten_detail(record: CoinDetailRecord) -> Option<EnrichedDetail> {
    let ath = record.ath_usd.filter(|a| *a > 0.0)?;
    let current_price = record.current_price_usd?;

    Some(EnrichedDetail {
        decline_from_high_pct: decline_from_high(ath, current_price),
        id: record.id,
        name: record.name,
        symbol: record.symbol,
        ath,
        ath_date: record.ath_date,
        current_price,
        chain_address: record.solana_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::market_data::ListingEntry;
    use crate::ports::mocks::ScriptedMarketData;

    fn listing_entry(id: &str, name: &str, symbol: &str) -> ListingEntry {
        ListingEntry {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }

    fn detail_record(id: &str, ath: f64, current: f64) -> CoinDetailRecord {
        CoinDetailRecord {
            id: id.to_string(),
            name: format!("{id} token"),
            symbol: id.to_string(),
            ath_usd: Some(ath),
            ath_date: None,
            current_price_usd: Some(current),
            solana_address: None,
        }
    }

    #[tokio::test]
    async fn discover_keeps_marker_matches_in_provider_order() {
        let provider = ScriptedMarketData::new().with_listing(vec![
            listing_entry("a", "Some Meme", "sm"),
            listing_entry("b", "Bonk", "bonk"),
            listing_entry("c", "Corn", "MEMECORN"),
        ]);
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let candidates = pipeline.discover().await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn enrich_skips_failing_candidates_and_continues() {
        let provider = ScriptedMarketData::new()
            .with_detail(detail_record("good", 100.0, 10.0))
            .with_failing_detail("bad")
            .with_detail(detail_record("also-good", 50.0, 5.0));
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let candidates = vec![
            CandidateToken { id: "good".into(), name: "g".into(), symbol: "g".into() },
            CandidateToken { id: "bad".into(), name: "b".into(), symbol: "b".into() },
            CandidateToken { id: "also-good".into(), name: "a".into(), symbol: "a".into() },
        ];

        let enriched = pipeline.enrich(candidates).await;
        let ids: Vec<&str> = enriched.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "also-good"]);
    }

    #[tokio::test]
    async fn enrich_recomputes_decline_rather_than_trusting_upstream() {
        let provider = ScriptedMarketData::new().with_detail(detail_record("t", 200.0, 30.0));
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let enriched = pipeline
            .enrich(vec![CandidateToken { id: "t".into(), name: "t".into(), symbol: "t".into() }])
            .await;
        assert_eq!(enriched[0].decline_from_high_pct, 85.0);
    }

    #[tokio::test]
    async fn enrich_drops_records_without_usd_quotes() {
        let mut record = detail_record("t", 100.0, 10.0);
        record.ath_usd = None;
        let provider = ScriptedMarketData::new().with_detail(record);
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let enriched = pipeline
            .enrich(vec![CandidateToken { id: "t".into(), name: "t".into(), symbol: "t".into() }])
            .await;
        assert!(enriched.is_empty());
    }

    #[tokio::test]
    async fn metrics_use_ceiling_when_history_is_empty() {
        let provider = ScriptedMarketData::new()
            .with_detail(detail_record("t", 100.0, 10.0))
            .with_chart("t", vec![]);
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let enriched = pipeline
            .enrich(vec![CandidateToken { id: "t".into(), name: "t".into(), symbol: "t".into() }])
            .await;
        let metrics = pipeline.compute_metrics(&enriched[0]).await.unwrap();
        assert_eq!(metrics.buying_price, 25.0);
        assert_eq!(metrics.symbol, "T");
    }

    #[tokio::test]
    async fn metrics_failure_names_the_history_fetch() {
        let provider = ScriptedMarketData::new()
            .with_detail(detail_record("t", 100.0, 10.0))
            .with_failing_chart("t");
        let pipeline = AnalysisPipeline::new(provider, Config::default());

        let enriched = pipeline
            .enrich(vec![CandidateToken { id: "t".into(), name: "t".into(), symbol: "t".into() }])
            .await;
        let err = pipeline.compute_metrics(&enriched[0]).await.unwrap_err();
        assert!(matches!(err, MetricsError::History(_)));
    }
}
