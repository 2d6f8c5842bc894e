//! Provided [`TickSource`] implementation over the embassy time driver.
use embassy_time::{Duration, Instant, Ticker};

use crate::transport::traits::tick_source::TickSource;

/// Default tick period, in milliseconds.
///
/// 1 ms gives the engine sub-10ms due-time resolution with room to spare;
/// cycle times are whole milliseconds, so a finer period buys nothing.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 1;

/// Drift-free periodic tick source backed by [`embassy_time::Ticker`].
///
/// `Ticker` schedules each expiry from the previous one rather than from
/// "now", so the tick train itself does not drift; the engine's additive
/// rescheduling absorbs whatever jitter individual ticks carry.
pub struct PeriodicTicker {
    period: Duration,
    ticker: Option<Ticker>,
}

impl PeriodicTicker {
    /// Tick source at an explicit period. Periods below 1 ms are clamped
    /// to 1 ms; a zero-length ticker would spin the executor.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(period_ms.max(1)),
            ticker: None,
        }
    }
}

impl Default for PeriodicTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD_MS)
    }
}

impl TickSource for PeriodicTicker {
    fn start(&mut self) {
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::every(self.period));
        }
    }

    fn stop(&mut self) {
        self.ticker = None;
    }

    async fn next_tick(&mut self) -> u64 {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.next().await;
                Instant::now().as_millis()
            }
            // Stopped: no further ticks until start() is called again.
            None => futures_util::future::pending().await,
        }
    }
}
