//! Cancellable debounce timers.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// A search waiting out its debounce window.
///
/// `cancel` only has an effect before the timer fires. Once `on_fire` has
/// started it runs to completion, so an in-flight request is never torn
/// down by a later reschedule. Dropping the handle does not cancel.
#[derive(Debug)]
pub struct ScheduledSearch {
    generation: u64,
    status: Arc<AtomicU8>,
    handle: JoinHandle<()>,
}

impl ScheduledSearch {
    /// Spawn the timer on the current Tokio runtime.
    pub fn spawn<F, Fut>(generation: u64, delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let status = Arc::new(AtomicU8::new(PENDING));
        let task_status = Arc::clone(&status);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task_status
                .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            on_fire().await;
        });

        Self {
            generation,
            status,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.status.load(Ordering::Acquire) == PENDING
    }

    pub fn has_fired(&self) -> bool {
        self.status.load(Ordering::Acquire) == FIRED
    }

    /// Cancel the timer. Returns `true` only for the call that actually
    /// cancelled it; later calls, and calls after the timer fired, are no-ops.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .status
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if cancelled {
            self.handle.abort();
            log::debug!("[Search] Cancelled pending search for generation {}", self.generation);
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() -> std::future::Ready<()> + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let task_count = Arc::clone(&count);
        (count, move || {
            task_count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (count, on_fire) = counter();
        let timer = ScheduledSearch::spawn(3, Duration::from_millis(600), on_fire);

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.has_fired());
        assert_eq!(timer.generation(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let (count, on_fire) = counter();
        let timer = ScheduledSearch::spawn(1, Duration::from_millis(300), on_fire);

        assert!(timer.cancel());
        assert!(!timer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!timer.has_fired());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_a_no_op() {
        let (count, on_fire) = counter();
        let timer = ScheduledSearch::spawn(1, Duration::from_millis(10), on_fire);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!timer.cancel());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
