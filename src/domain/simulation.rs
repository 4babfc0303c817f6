//! Investment Outcome Simulation
//!
//! Pure math for the "bought near the peak, then held" hypothetical. The
//! entry price is capped at a fraction of the ATH: the simulation never
//! assumes an entry later than `ceiling_pct` of peak price, but takes the
//! actual earliest known price when that is more conservative.

/// Derived outcome of a fixed hypothetical investment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentOutcome {
    pub tokens_purchased: f64,
    /// Position value had it been sold at the ATH
    pub potential_earnings_ath: f64,
    /// ATH proceeds divided by the reference monthly cost
    pub potential_chemo_sessions: f64,
    /// Position value at the current price
    pub current_value: f64,
    /// Zero when in profit, otherwise `current_value - investment`
    pub loss: f64,
}

/// Hypothetical entry price: the earliest historical price when it is known,
/// positive, and below the ceiling; otherwise the ceiling itself.
pub fn entry_price(ath: f64, ceiling_pct: f64, earliest_historical: Option<f64>) -> f64 {
    let cap = ath * ceiling_pct / 100.0;
    match earliest_historical {
        Some(p) if p > 0.0 && p < cap => p,
        _ => cap,
    }
}

/// Simulate the outcome of investing `investment` at `buying_price`.
///
/// Returns `None` when `buying_price` is not positive - there is no position
/// size to derive, and every downstream figure would be a division artifact.
pub fn simulate_outcome(
    investment: f64,
    monthly_cost_reference: f64,
    buying_price: f64,
    ath: f64,
    current_price: f64,
) -> Option<InvestmentOutcome> {
    if buying_price <= 0.0 {
        return None;
    }

    let tokens_purchased = investment / buying_price;
    let potential_earnings_ath = ath * tokens_purchased;
    let current_value = current_price * tokens_purchased;
    let loss = if current_value > investment {
        0.0
    } else {
        current_value - investment
    };

    Some(InvestmentOutcome {
        tokens_purchased,
        potential_earnings_ath,
        potential_chemo_sessions: potential_earnings_ath / monthly_cost_reference,
        current_value,
        loss,
    })
}
