//! Console Report
//!
//! Renders the two closing tables from the finished metric records: what the
//! position was worth at the ATH, and what it is worth today. This is the
//! presentation edge of the binary - it receives finished `CoinMetrics` and
//! produces no data anything else consumes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_BORDERS_ONLY, Attribute, Cell, CellAlignment,
    ContentArrangement, Table,
};

use crate::domain::token::CoinMetrics;

/// Pause between narration beats
const NARRATION_PAUSE: Duration = Duration::from_secs(2);

fn format_usd(value: f64) -> String {
    // meme coin prices are routinely sub-cent; keep the digits that matter
    if value == 0.0 || value.abs() >= 0.01 {
        format!("${value:.2}")
    } else {
        format!("${value:.8}")
    }
}

fn format_ath_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn base_table(headers: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// "Sold at the peak" table
pub fn peak_exit_table(results: &[CoinMetrics], investment: f64) -> Table {
    let mut table = base_table(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new("Your Investment").add_attribute(Attribute::Bold),
        Cell::new("Entry Price").add_attribute(Attribute::Bold),
        Cell::new("ATH Price").add_attribute(Attribute::Bold),
        Cell::new("ATH Date").add_attribute(Attribute::Bold),
        Cell::new("Earnings @ ATH")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new("Chemo Months Covered")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    for coin in results {
        table.add_row(vec![
            Cell::new(&coin.symbol),
            Cell::new(format_usd(investment)),
            Cell::new(format_usd(coin.buying_price)),
            Cell::new(format_usd(coin.ath)),
            Cell::new(format_ath_date(coin.ath_date)),
            Cell::new(format_usd(coin.potential_earnings_ath)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", coin.potential_chemo_sessions))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// "Held until today" table
pub fn hold_to_today_table(results: &[CoinMetrics], investment: f64) -> Table {
    let mut table = base_table(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new("Your Investment").add_attribute(Attribute::Bold),
        Cell::new("ATH Price").add_attribute(Attribute::Bold),
        Cell::new("ATH Drop")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new("Current Price").add_attribute(Attribute::Bold),
        Cell::new("Current Value")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new("Your Loss")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    for coin in results {
        let loss = if coin.loss == 0.0 {
            "0.00".to_string()
        } else {
            format!("{:.2}", coin.loss)
        };

        table.add_row(vec![
            Cell::new(&coin.symbol),
            Cell::new(format_usd(investment)),
            Cell::new(format_usd(coin.ath)),
            Cell::new(format!("{:.2}%", coin.ath_drop_percentage)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(coin.current_price)),
            Cell::new(format_usd(coin.current_value)).set_alignment(CellAlignment::Right),
            Cell::new(loss).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print the narrated report: the peak-exit table, a beat, then the
/// hold-to-today table.
pub async fn present(results: &[CoinMetrics], investment: f64) {
    if results.is_empty() {
        println!("\nNo tokens completed the analysis. Nothing to show.");
        return;
    }

    println!("\nNow imagine...");
    tokio::time::sleep(NARRATION_PAUSE).await;

    println!(
        "\nWhat if you had put {} into each of those tokens at some point?",
        format_usd(investment)
    );
    println!("Say a year ago. And you sold at the ATH, or near that point.");
    tokio::time::sleep(NARRATION_PAUSE).await;

    println!("\nThat's what you would have gotten:\n");
    println!("{}", peak_exit_table(results, investment));
    tokio::time::sleep(NARRATION_PAUSE).await;

    println!("\nBut you waited. Or you did not know. Doesn't matter...");
    println!("Time matters. And now you've got this:\n");
    tokio::time::sleep(NARRATION_PAUSE).await;

    println!("{}", hold_to_today_table(results, investment));

    println!("\nTime matters. So do you. Don't waste either.");
}
