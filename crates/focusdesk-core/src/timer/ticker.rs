//! Cancellable repeating ticker.
//!
//! `Ticker::spawn` starts a tokio task that delivers one unit message per
//! period over a bounded channel. Dropping (or explicitly cancelling) the
//! handle aborts the task, so pause and reset cannot leave a stray interval
//! running, and holding a single handle makes stacked tickers impossible.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running ticker. The tick stream ends when this is dropped.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker emitting every `period`. Must be called from within a
    /// tokio runtime.
    pub fn spawn(period: Duration) -> (Ticker, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first interval tick fires immediately; swallow it so the
            // first delivered tick means one full period has elapsed.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        (Ticker { handle }, rx)
    }

    /// Spawn the standard one-second ticker.
    pub fn spawn_secondly() -> (Ticker, mpsc::Receiver<()>) {
        Self::spawn(Duration::from_secs(1))
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
