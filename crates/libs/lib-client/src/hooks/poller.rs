//! # Poller
//!
//! Fixed-interval driver shared by the balance and portfolio watchers. The
//! first tick fires immediately; a slow tick delays the next one instead of
//! bunching ticks together.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns one polling task. Stopping or dropping the poller aborts it.
#[derive(Debug, Default)]
pub struct Poller {
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick().await;
            }
        });

        Self { task: Some(task) }
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_poller(period: Duration) -> (Poller, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let poller = Poller::start(period, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (poller, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_immediately_then_every_period() {
        let (_poller, ticks) = counting_poller(Duration::from_secs(15));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let (mut poller, ticks) = counting_poller(Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1)).await;

        poller.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert!(!poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_ends_ticks() {
        let (poller, ticks) = counting_poller(Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1)).await;

        drop(poller);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }
}
