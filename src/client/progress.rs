use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::trace;

/// Repeating timer that fabricates a progress percentage.
///
/// Every `period` the published value grows by one until it reaches `cap`,
/// where the task stops by itself. Cancelling or dropping the ticker aborts
/// the task.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
    progress: watch::Receiver<u8>,
}

impl ProgressTicker {
    pub fn start(period: Duration, cap: u8) -> Self {
        let (tx, progress) = watch::channel(0u8);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let mut reached = false;
                tx.send_modify(|p| {
                    if *p < cap {
                        *p += 1;
                    }
                    reached = *p >= cap;
                });
                if reached {
                    trace!(cap, "Progress ticker reached cap");
                    break;
                }
            }
        });
        Self { handle, progress }
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    pub fn current(&self) -> u8 {
        *self.progress.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the timer and returns the last published value.
    pub fn cancel(self) -> u8 {
        self.handle.abort();
        self.current()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn counts_one_per_period() {
        let ticker = ProgressTicker::start(Duration::from_millis(200), 95);
        assert_eq!(ticker.current(), 0);
        time::sleep(Duration::from_millis(1_010)).await;
        assert_eq!(ticker.current(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_cap() {
        let ticker = ProgressTicker::start(Duration::from_millis(200), 95);
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ticker.current(), 95);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_freezes_the_value() {
        let ticker = ProgressTicker::start(Duration::from_millis(200), 95);
        let rx = ticker.subscribe();
        time::sleep(Duration::from_millis(610)).await;
        assert_eq!(ticker.cancel(), 3);
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*rx.borrow(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_monotonic_values() {
        let ticker = ProgressTicker::start(Duration::from_millis(10), 20);
        let mut rx = ticker.subscribe();
        let mut seen = vec![];
        while rx.changed().await.is_ok() {
            seen.push(*rx.borrow_and_update());
        }
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&20));
    }
}
