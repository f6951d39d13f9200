//! Recurring tick as a cancellable resource.

use std::future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fires once per `period` while armed; never fires while disarmed.
///
/// The interval is created on `arm` and dropped on `disarm`, so once a stop
/// has been processed no tick that was scheduled before it can be observed.
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start ticking; the first tick lands one full period from now.
    /// Arming an armed ticker keeps the current schedule.
    pub fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // Ticks missed while the loop was busy are delivered late, not lost.
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        self.interval = Some(interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick. Pending forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn armed_ticker_fires_once_per_period() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm();

        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::every_second();
        assert!(timeout(Duration::from_secs(10), ticker.tick()).await.is_err());

        ticker.arm();
        ticker.tick().await;
        ticker.disarm();
        assert!(!ticker.is_armed());
        assert!(timeout(Duration::from_secs(10), ticker.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_does_not_reset_schedule() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm();
        tokio::time::advance(Duration::from_millis(600)).await;
        ticker.arm();

        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }
}
