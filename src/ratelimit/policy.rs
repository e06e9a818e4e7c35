//! Limit policy: how many requests fit in which trailing window.

use std::time::Duration;

use crate::error::{Result, WardenError};

/// Default number of requests admitted per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;
/// Default trailing window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// A validated "N requests per rolling window" policy.
///
/// Both fields are guaranteed non-zero, so a policy can never produce a
/// limiter that denies everything or counts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    max_requests: u32,
    window: Duration,
}

impl LimitPolicy {
    /// Create a policy, rejecting a zero limit or an empty window.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self> {
        if max_requests == 0 {
            return Err(WardenError::InvalidArgument(
                "max_requests must be greater than zero".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(WardenError::InvalidArgument(
                "window duration must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            max_requests,
            window,
        })
    }

    /// Create a policy from a window expressed in milliseconds.
    pub fn from_millis(max_requests: u32, window_ms: u64) -> Result<Self> {
        Self::new(max_requests, Duration::from_millis(window_ms))
    }

    /// Maximum requests admitted inside one window.
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}
