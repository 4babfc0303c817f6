//! Paced Request Gate
//!
//! Fixed-interval pacing around every outbound call. The provider enforces
//! an undocumented per-minute call budget on its free tier; a conservative
//! static delay before AND after each request keeps the run well under it,
//! at the cost of wall-clock time scaling linearly with the call count.
//! There is no per-endpoint differentiation and no adaptive back-off.

use std::time::Duration;

/// Awaitable fixed-delay gate shared by all provider calls
#[derive(Debug, Clone)]
pub struct RequestPacer {
    delay: Duration,
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Suspend for the configured interval. Called once before and once
    /// after every request.
    pub async fn pause(&self) {
        tracing::debug!("pacing: waiting {:?} before touching the API", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}
