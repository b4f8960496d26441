//! Fixed-rate tick driving for the Sidewinder session core.
//!
//! [`Scheduler::spawn`] starts a loop that fires a caller-supplied async
//! callback at a fixed period, 50 ms by default, beginning immediately.
//! Ticks are serialized: the next deadline is not polled until the
//! callback returns. When a tick overruns its period, one catch-up tick
//! fires as soon as the callback returns; further deadlines that passed
//! in the meantime are dropped and the one after lands back on the
//! period grid. A stall never produces a burst of catch-up ticks.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace, warn};

/// Configuration for the tick scheduler.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between tick starts.
    pub period: Duration,
}

impl TickConfig {
    /// The simulation rate the arcade clients are built against: 20 Hz.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(50);

    /// Config with a custom period.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
        }
    }
}

/// Handle to a running tick loop.
///
/// Dropping the handle stops the loop without waiting for it. Prefer
/// [`shutdown`](Self::shutdown), which waits until the final tick has
/// completed.
#[derive(Debug)]
pub struct Scheduler {
    period: Duration,
    ticks: Arc<AtomicU64>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Scheduler {
    /// Spawns the tick loop on the current Tokio runtime.
    ///
    /// The first tick fires immediately. `tick_fn` runs to completion
    /// before the next deadline is considered; a callback slower than the
    /// period is followed by one immediate catch-up tick, with any other
    /// deadlines it ran through skipped.
    pub fn spawn<F, Fut>(config: TickConfig, mut tick_fn: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let period = config.period;
        let ticks = Arc::new(AtomicU64::new(0));
        let (stop, mut stopped) = watch::channel(false);

        let counter = Arc::clone(&ticks);
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            debug!(period_ms = period.as_millis() as u64, "tick loop started");

            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = interval.tick() => {
                        let started = time::Instant::now();
                        tick_fn().await;
                        let tick = counter.fetch_add(1, Ordering::Relaxed) + 1;

                        let elapsed = started.elapsed();
                        if elapsed > period {
                            warn!(
                                tick,
                                elapsed_ms = elapsed.as_millis() as u64,
                                period_ms = period.as_millis() as u64,
                                "tick overran its period"
                            );
                        } else {
                            trace!(tick, "tick completed");
                        }
                    }
                }
            }

            debug!("tick loop stopped");
        });

        Self {
            period,
            ticks,
            stop,
            task,
        }
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the loop and waits for it to wind down.
    ///
    /// An in-progress tick runs to completion; no tick starts after this
    /// returns.
    pub async fn shutdown(self) {
        // The loop may already be gone if the runtime is tearing down.
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}
