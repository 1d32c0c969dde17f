//! Cancelable deferred actions.
//!
//! A [`ScheduledTask`] runs a closure once after a delay on the tokio
//! runtime. The owner can cancel it, run it early, or simply drop it; dropping
//! cancels, so an action never fires after its owner is gone. Outside a
//! runtime there is no timer: the action stays pending until it is run early
//! or cancelled.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Action = Box<dyn FnOnce() + Send + 'static>;

/// Slot shared between the owner and the timer task; whoever takes the
/// action first is the only one to run it.
#[derive(Clone)]
struct ActionSlot(Arc<Mutex<Option<Action>>>);

impl ActionSlot {
    fn new(action: Action) -> Self {
        Self(Arc::new(Mutex::new(Some(action))))
    }

    fn take(&self) -> Option<Action> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn is_filled(&self) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// A one-shot action scheduled after a fixed delay.
pub struct ScheduledTask {
    label: &'static str,
    slot: ActionSlot,
    timer: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Schedule `action` to run once `delay` has elapsed.
    pub fn after<F>(label: &'static str, delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let slot = ActionSlot::new(Box::new(action));
        let timer_slot = slot.clone();

        let timer = match Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(action) = timer_slot.take() {
                    tracing::debug!(task = label, "scheduled task fired");
                    action();
                }
            })),
            Err(_) => {
                tracing::warn!(
                    task = label,
                    "no tokio runtime; task held until run or cancelled"
                );
                None
            }
        };

        tracing::debug!(
            task = label,
            delay_ms = delay.as_millis() as u64,
            "task scheduled"
        );
        Self { label, slot, timer }
    }

    /// Whether a timer is counting down for this task.
    pub fn is_timed(&self) -> bool {
        self.timer.is_some()
    }

    fn stop_timer(&self) {
        if let Some(timer) = &self.timer {
            timer.abort();
        }
    }

    /// Whether the action has neither run nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.slot.is_filled()
    }

    /// Drop the action without running it.
    ///
    /// Returns `true` if the action was still pending.
    pub fn cancel(&self) -> bool {
        self.stop_timer();
        let cancelled = self.slot.take().is_some();
        if cancelled {
            tracing::debug!(task = self.label, "scheduled task cancelled");
        }
        cancelled
    }

    /// Run the action now instead of waiting for the timer.
    ///
    /// Returns `true` if the action ran; `false` if it had already fired or
    /// been cancelled.
    pub fn run_now(&self) -> bool {
        self.stop_timer();
        match self.slot.take() {
            Some(action) => {
                tracing::debug!(task = self.label, "scheduled task run early");
                action();
                true
            }
            None => false,
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("label", &self.label)
            .field("pending", &self.is_pending())
            .field("timed", &self.is_timed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(500), action);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(task.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(100), action);

        assert!(task.cancel());
        assert!(!task.cancel());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(100), action);
        drop(task);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_now_runs_once() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(100), action);

        assert!(task.run_now());
        assert!(!task.run_now());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_without_runtime_holds_action() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(100), action);

        assert!(!task.is_timed());
        assert!(task.is_pending());
        assert!(task.run_now());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[test]
    fn test_without_runtime_drop_discards_action() {
        let (count, action) = counter();
        let task = ScheduledTask::after("test", Duration::from_millis(100), action);
        drop(task);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
