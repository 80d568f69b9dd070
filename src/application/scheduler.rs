//! Fixed-interval job scheduler.
//!
//! Each tick spawns the job as its own task, so a slow run never delays the
//! next tick. A semaphore caps how many runs may be in flight; a tick that
//! finds every permit taken is skipped rather than queued.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, warn};

/// Counters returned when the scheduler stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    /// Ticks that started a run.
    pub started: u64,
    /// Ticks dropped because too many runs were in flight.
    pub skipped: u64,
    /// Runs that panicked.
    pub panicked: u64,
}

/// Invokes a job every `interval` until shut down.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    interval: Duration,
    max_in_flight: usize,
}

impl IntervalScheduler {
    /// `max_in_flight` is clamped to at least one.
    #[must_use]
    pub fn new(interval: Duration, max_in_flight: usize) -> Self {
        Self {
            interval,
            max_in_flight: max_in_flight.max(1),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tick until `shutdown` resolves, then wait for in-flight runs.
    ///
    /// The first tick fires immediately.
    pub async fn run<F, Fut, S>(&self, job: F, shutdown: S) -> SchedulerReport
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
        S: Future<Output = ()>,
    {
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();
        let mut report = SchedulerReport::default();

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    match Arc::clone(&permits).try_acquire_owned() {
                        Ok(permit) => {
                            let run = job();
                            tasks.spawn(async move {
                                run.await;
                                drop(permit);
                            });
                            report.started += 1;
                        }
                        Err(_) => {
                            report.skipped += 1;
                            warn!(
                                in_flight = self.max_in_flight,
                                "Previous runs still in flight, skipping tick"
                            );
                        }
                    }
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        report.panicked += 1;
                        error!(error = %e, "Scheduled run aborted");
                    }
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                report.panicked += 1;
                error!(error = %e, "Scheduled run aborted");
            }
        }

        report
    }
}
