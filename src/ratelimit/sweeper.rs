//! Background eviction of idle identifiers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::limiter::RateLimiter;

/// Handle to a running sweeper task.
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Spawn a task that calls [`RateLimiter::evict_idle`] every `interval`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_sweeper(limiter: Arc<RateLimiter>, interval: Duration) -> SweeperHandle {
    let (tx, mut rx) = oneshot::channel();

    info!(interval_ms = interval.as_millis() as u64, "Starting idle identifier sweeper");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut rx => {
                    debug!("Sweeper shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let evicted = limiter.evict_idle();
                    if evicted > 0 {
                        debug!(
                            evicted = evicted,
                            remaining = limiter.identifier_count(),
                            "Sweep complete"
                        );
                    }
                }
            }
        }
    });

    SweeperHandle {
        shutdown: Some(tx),
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::clock::ManualClock;
    use crate::ratelimit::LimitPolicy;

    #[tokio::test]
    async fn test_sweeper_evicts_idle_identifiers() {
        let clock = Arc::new(ManualClock::new());
        let limiter = Arc::new(RateLimiter::new().with_clock(clock.clone()));
        let policy = LimitPolicy::from_millis(5, 100).unwrap();

        assert!(limiter.is_allowed("idle", &policy));
        assert_eq!(limiter.identifier_count(), 1);

        clock.advance(Duration::from_millis(200));
        let sweeper = spawn_sweeper(limiter.clone(), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(limiter.identifier_count(), 0);

        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_shutdown() {
        let limiter = Arc::new(RateLimiter::new());
        let sweeper = spawn_sweeper(limiter, Duration::from_secs(3600));
        sweeper.shutdown().await;
    }
}
