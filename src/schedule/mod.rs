//! Idempotent recurring scheduling over a single tokio task.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Recurring period for the scheduled scan.
pub const DAILY: Duration = Duration::from_secs(24 * 60 * 60);

/// Owns at most one recurring job task.
///
/// Scheduling while a job is already scheduled and unscheduling while none
/// exists are both no-ops, so the registration step can run on every startup
/// without creating duplicates.
#[derive(Default)]
pub struct Scheduler {
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    /// Run `job` after `start_delay` and then every `every`. Missed ticks
    /// are delayed, not bursted. No-op when already scheduled.
    pub fn schedule<F, Fut>(&mut self, start_delay: Duration, every: Duration, job: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        if self.handle.is_some() {
            return;
        }
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + start_delay, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job().await;
            }
        }));
    }

    /// Abort the recurring task. No-op when nothing is scheduled.
    pub fn unschedule(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.unschedule();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_job(counter: Arc<AtomicUsize>) -> impl Fn() -> std::future::Ready<()> + Send {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn scheduled_job_fires() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            Duration::ZERO,
            Duration::from_millis(10),
            counting_job(counter.clone()),
        );
        assert!(scheduler.is_scheduled());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(counter.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn schedule_when_scheduled_is_noop() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();

        scheduler.schedule(
            Duration::from_secs(3600),
            Duration::from_secs(3600),
            counting_job(first.clone()),
        );
        scheduler.schedule(
            Duration::ZERO,
            Duration::from_millis(10),
            counting_job(second.clone()),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_scheduled());
    }

    #[tokio::test]
    async fn unschedule_when_empty_is_noop() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.is_scheduled());
        scheduler.unschedule();
        assert!(!scheduler.is_scheduled());
    }

    #[tokio::test]
    async fn unschedule_stops_the_job() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            Duration::ZERO,
            Duration::from_millis(10),
            counting_job(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.unschedule();
        assert!(!scheduler.is_scheduled());

        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_stop = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn unschedule_allows_rescheduling() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            Duration::from_secs(3600),
            Duration::from_secs(3600),
            counting_job(counter.clone()),
        );
        scheduler.unschedule();

        scheduler.schedule(
            Duration::ZERO,
            Duration::from_millis(10),
            counting_job(counter.clone()),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(counter.load(Ordering::SeqCst) >= 1);
    }
}
