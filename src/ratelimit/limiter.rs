//! Core sliding-window rate limiter.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::policy::LimitPolicy;
use crate::error::{Result, WardenError};

/// Request history for a single identifier.
#[derive(Debug)]
struct WindowEntry {
    /// Admitted request instants, oldest first
    timestamps: VecDeque<Instant>,
    /// Window used by the most recent check, consulted by idle eviction
    window: Duration,
}

impl WindowEntry {
    fn new(window: Duration) -> Self {
        Self {
            timestamps: VecDeque::new(),
            window,
        }
    }

    /// Drop every timestamp at least `window` old.
    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

/// In-memory sliding-window rate limiter keyed by an opaque identifier.
///
/// Each identifier gets its own trailing window of admitted request
/// timestamps. The filter/check/append sequence for one identifier runs under
/// that identifier's shard lock, so concurrent callers never push an
/// identifier past its limit.
///
/// State lives only in this process: it is lost on restart and is not shared
/// between instances. Use a distributed store when several replicas must
/// enforce one budget.
pub struct RateLimiter {
    /// Request history indexed by identifier
    windows: DashMap<String, WindowEntry>,
    /// Policy used by [`RateLimiter::check`]
    default_policy: LimitPolicy,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter with the default policy (100 requests per 60s).
    pub fn new() -> Self {
        Self::with_policy(LimitPolicy::default())
    }

    /// Create a limiter whose [`check`](Self::check) uses `policy`.
    pub fn with_policy(policy: LimitPolicy) -> Self {
        Self {
            windows: DashMap::new(),
            default_policy: policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source. Intended for tests and simulations.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The policy applied by [`check`](Self::check).
    pub fn default_policy(&self) -> LimitPolicy {
        self.default_policy
    }

    /// Check `identifier` against the limiter's default policy.
    pub fn check(&self, identifier: &str) -> bool {
        self.is_allowed(identifier, &self.default_policy)
    }

    /// Decide whether a new request from `identifier` is admitted.
    ///
    /// Timestamps that have left the window are dropped first; the pruned
    /// history is kept whatever the outcome. A rejected request is not
    /// recorded.
    pub fn is_allowed(&self, identifier: &str, policy: &LimitPolicy) -> bool {
        let limit = policy.max_requests() as usize;

        let mut entry = self
            .windows
            .entry(identifier.to_string())
            .or_insert_with(|| WindowEntry::new(policy.window()));

        // Read the clock under the shard lock so appends stay in time order.
        let now = self.clock.now();
        entry.window = policy.window();
        entry.prune(now);

        trace!(
            identifier = %identifier,
            in_window = entry.timestamps.len(),
            limit = limit,
            "Checking rate limit"
        );

        if entry.timestamps.len() >= limit {
            debug!(
                identifier = %identifier,
                limit = limit,
                window_ms = policy.window().as_millis() as u64,
                "Rate limit exceeded"
            );
            return false;
        }

        entry.timestamps.push_back(now);
        true
    }

    /// Validating variant of [`is_allowed`](Self::is_allowed).
    ///
    /// Rejects an empty identifier, a zero limit or a zero window with
    /// [`WardenError::InvalidArgument`] instead of producing a degenerate
    /// decision.
    pub fn try_is_allowed(
        &self,
        identifier: &str,
        max_requests: u32,
        window_ms: u64,
    ) -> Result<bool> {
        if identifier.is_empty() {
            return Err(WardenError::InvalidArgument(
                "identifier must not be empty".to_string(),
            ));
        }
        let policy = LimitPolicy::from_millis(max_requests, window_ms)?;
        Ok(self.is_allowed(identifier, &policy))
    }

    /// Forget all history for `identifier`. No-op when it was never seen.
    pub fn clear(&self, identifier: &str) {
        if self.windows.remove(identifier).is_some() {
            debug!(identifier = %identifier, "Cleared rate limit history");
        }
    }

    /// Forget all history for every identifier.
    pub fn clear_all(&self) {
        self.windows.clear();
    }

    /// Number of requests currently recorded for `identifier`.
    ///
    /// Does not prune, so stale timestamps still count until the next check
    /// or eviction pass.
    pub fn request_count(&self, identifier: &str) -> usize {
        self.windows
            .get(identifier)
            .map(|entry| entry.timestamps.len())
            .unwrap_or(0)
    }

    /// Number of identifiers with recorded history.
    pub fn identifier_count(&self) -> usize {
        self.windows.len()
    }

    /// Prune every identifier against its last window and drop the ones left
    /// with no history. Returns how many identifiers were removed.
    pub fn evict_idle(&self) -> usize {
        let now = self.clock.now();
        let mut evicted = 0;

        self.windows.retain(|_, entry| {
            entry.prune(now);
            let keep = !entry.timestamps.is_empty();
            if !keep {
                evicted += 1;
            }
            keep
        });

        if evicted > 0 {
            debug!(evicted = evicted, "Evicted idle identifiers");
        }
        evicted
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
