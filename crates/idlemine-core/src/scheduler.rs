//! The fixed-period accrual scheduler.
//!
//! The scheduler owns a background task that does nothing but send a
//! unit tick message at each period boundary; all state mutation happens
//! in the engine actor that receives the messages. Starting an already
//! running scheduler cancels the previous task first, so two schedulers
//! can never feed the same engine -- duplicate accrual is structurally
//! impossible.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Message sent to the engine on every scheduler period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualTick;

/// Handle to the periodic tick task.
///
/// The first tick fires one full period after start, never immediately.
/// The task stops on [`stop`], on restart, on drop, or when the
/// receiving engine goes away.
///
/// [`stop`]: AccrualScheduler::stop
#[derive(Debug)]
pub struct AccrualScheduler {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl AccrualScheduler {
    /// Create a stopped scheduler with the given tick period.
    pub const fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    /// The configured tick period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether a tick task has been started and not yet stopped.
    pub const fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start ticking into `ticks`. Cancels any previously started task
    /// first.
    pub fn start(&mut self, ticks: mpsc::Sender<AccrualTick>) {
        self.stop();

        let period = self.period;
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if ticks.send(AccrualTick).await.is_err() {
                    // Receiver gone: the engine stopped without us.
                    break;
                }
            }
        });

        self.task = Some(handle);
        debug!(period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX), "accrual scheduler started");
    }

    /// Stop ticking. A no-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("accrual scheduler stopped");
        }
    }
}

impl Drop for AccrualScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::Receiver<AccrualTick>) -> usize {
        let mut count = 0_usize;
        while rx.try_recv().is_ok() {
            count = count.saturating_add(1);
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_never_immediately() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut scheduler = AccrualScheduler::new(Duration::from_millis(100));
        scheduler.start(tx);

        // No tick at t=0.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(drain(&mut rx), 0);

        // Ticks at 100..=1000 ms.
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(drain(&mut rx), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticking() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut scheduler = AccrualScheduler::new(Duration::from_millis(100));
        scheduler.start(tx);

        tokio::time::sleep(Duration::from_millis(249)).await;
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert_eq!(drain(&mut rx), 2);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_the_previous_task() {
        let (first_tx, mut first_rx) = mpsc::channel(64);
        let (second_tx, mut second_rx) = mpsc::channel(64);
        let mut scheduler = AccrualScheduler::new(Duration::from_millis(100));

        scheduler.start(first_tx);
        tokio::time::sleep(Duration::from_millis(249)).await;

        // Restart onto a new channel: the first task must die with it.
        scheduler.start(second_tx);
        tokio::time::sleep(Duration::from_millis(549)).await;

        assert_eq!(drain(&mut first_rx), 2);
        assert_eq!(drain(&mut second_rx), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_receiver_ends_the_task() {
        let (tx, rx) = mpsc::channel(64);
        let mut scheduler = AccrualScheduler::new(Duration::from_millis(100));
        scheduler.start(tx);
        drop(rx);

        // Give the task a period to notice the closed channel; it must
        // not panic the runtime.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(scheduler.is_running());
        scheduler.stop();
    }
}
