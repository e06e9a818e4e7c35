//! Rate limiting logic and state management.

mod clock;
mod limiter;
mod policy;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::RateLimiter;
pub use policy::{LimitPolicy, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
pub use sweeper::{spawn_sweeper, SweeperHandle};
