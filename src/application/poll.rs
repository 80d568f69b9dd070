//! The poll loop: one watch cycle per scheduler tick.

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use super::context::WatchContext;
use super::scheduler::{IntervalScheduler, SchedulerReport};

/// Drives [`WatchContext::run_cycle`] on a fixed interval.
pub struct PollLoop {
    context: Arc<WatchContext>,
    scheduler: IntervalScheduler,
}

impl PollLoop {
    #[must_use]
    pub fn new(context: Arc<WatchContext>, scheduler: IntervalScheduler) -> Self {
        Self { context, scheduler }
    }

    /// Poll until `shutdown` resolves. Cycle outcomes are logged by the
    /// context; nothing a cycle does can stop the loop.
    pub async fn run<S>(self, shutdown: S) -> SchedulerReport
    where
        S: Future<Output = ()>,
    {
        info!(
            url = self.context.extractor().url(),
            interval_secs = self.scheduler.interval().as_secs(),
            destination = %self.context.destination(),
            "Poll loop started"
        );

        let context = Arc::clone(&self.context);
        let report = self
            .scheduler
            .run(
                move || {
                    let context = Arc::clone(&context);
                    async move {
                        context.run_cycle().await;
                    }
                },
                shutdown,
            )
            .await;

        info!(
            cycles = report.started,
            skipped = report.skipped,
            panicked = report.panicked,
            "Poll loop stopped"
        );
        report
    }
}
