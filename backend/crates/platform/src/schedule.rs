//! Scheduled Tasks
//!
//! Deferred and periodic work on the tokio runtime. Every piece of work is
//! owned by a [`ScheduledTask`] handle and is aborted when the handle is
//! dropped, so a component that holds its handles cannot leak timers past
//! its own lifetime.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a spawned timer task. Dropping it cancels the task.
#[derive(Debug)]
#[must_use = "dropping a ScheduledTask cancels it immediately"]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Cancel the task explicitly.
    pub fn cancel(self) {
        // Drop aborts.
    }

    /// True once a one-shot task has fired, or a periodic task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `f` once after `delay`.
///
/// Must be called from within a tokio runtime.
pub fn once<F>(delay: Duration, f: F) -> ScheduledTask
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        time::sleep(delay).await;
        f();
    });
    ScheduledTask { handle }
}

/// Run `f` every `period`, first after one full period.
///
/// The task stops when `f` returns [`ControlFlow::Break`]. Ticks missed
/// under load are delayed rather than burst.
pub fn every<F>(period: Duration, mut f: F) -> ScheduledTask
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if f().is_break() {
                break;
            }
        }
    });
    ScheduledTask { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let c = Arc::new(AtomicUsize::new(0));
        (c.clone(), c)
    }

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let (count, inner) = counter();
        let task = once(Duration::from_secs(2), move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(1_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_once_cancels_it() {
        let (count, inner) = counter();
        let task = once(Duration::from_secs(2), move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        drop(task);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_ticks_until_cancelled() {
        let (count, inner) = counter();
        let task = every(Duration::from_secs(1), move || {
            inner.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        task.cancel();
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_stops_on_break() {
        let (count, inner) = counter();
        let task = every(Duration::from_millis(30), move || {
            let seen = inner.fetch_add(1, Ordering::SeqCst) + 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(task.is_finished());
    }
}
