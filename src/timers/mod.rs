//! Owned background timers on the tokio runtime.
//!
//! Every periodic or one-shot activity is a task paired with a
//! [`CancellationToken`]. Cancelling (or dropping) the handle stops the task at
//! its next await point and the callback never runs again. The live view drives
//! these on a current-thread runtime, so callbacks never overlap.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
pub use tokio_util::sync::CancellationToken;

/// Runs `tick` every `period` until cancelled or until `tick` returns `false`.
///
/// Must be spawned from inside a tokio runtime.
pub struct PeriodicTask {
    name: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn spawn<F>(name: &str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            // Skip missed ticks after a stall instead of firing them in a burst.
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = ticks.tick() => {
                        if !tick() {
                            break;
                        }
                    }
                }
            }
        });
        log::debug!("Started periodic task '{}' every {:?}", name, period);
        Self {
            name: name.to_string(),
            token,
            handle,
        }
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() && !self.token.is_cancelled() {
            log::debug!("Cancelling periodic task '{}'", self.name);
        }
        self.token.cancel();
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs `fire` once after `delay` unless cancelled first.
///
/// Must be spawned from inside a tokio runtime.
pub struct DeferredTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl DeferredTask {
    pub fn spawn<F>(delay: Duration, fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {}
                _ = sleep(delay) => fire(),
            }
        });
        Self { token, handle }
    }

    pub fn is_pending(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    async fn settle<F: Fn() -> bool>(done: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done() && Instant::now() < deadline {
            sleep(Duration::from_millis(2)).await;
        }
    }

    #[tokio::test]
    async fn periodic_task_ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let task = PeriodicTask::spawn("test", Duration::from_millis(5), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });
        settle(|| count.load(Ordering::SeqCst) >= 3).await;
        task.cancel();
        // Let the task observe the cancellation.
        tokio::task::yield_now().await;

        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel >= 3);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn periodic_task_stops_when_tick_declines() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = PeriodicTask::spawn("once", Duration::from_millis(1), move || {
            let _ = tx.send(());
            false
        });
        timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
        // The closure and its sender are gone with the finished task.
        assert_eq!(timeout(Duration::from_secs(5), rx.recv()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn deferred_task_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = DeferredTask::spawn(Duration::from_millis(5), move || {
            let _ = tx.send("fired");
        });
        assert_eq!(
            timeout(Duration::from_secs(5), rx.recv()).await.unwrap(),
            Some("fired")
        );
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn cancelled_deferred_task_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let task = DeferredTask::spawn(Duration::from_secs(60), move || {
            let _ = tx.send(());
        });
        assert!(task.is_pending());
        task.cancel();
        assert!(!task.is_pending());
        assert_eq!(timeout(Duration::from_secs(5), rx.recv()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn due_but_cancelled_task_does_not_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let task = DeferredTask::spawn(Duration::ZERO, move || {
            let _ = tx.send(());
        });
        // Cancelled before the runtime ever polls it.
        task.cancel();
        assert_eq!(timeout(Duration::from_secs(5), rx.recv()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dropping_deferred_task_cancels_it() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let task = DeferredTask::spawn(Duration::from_secs(60), move || {
            let _ = tx.send(());
        });
        drop(task);
        assert_eq!(timeout(Duration::from_secs(5), rx.recv()).await.unwrap(), None);
    }
}
