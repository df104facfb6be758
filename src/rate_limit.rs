use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

// Development key limits: 20 requests per second, 100 requests per 2 minutes.
const MAX_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};
const MAX_REQUESTS_PER_WINDOW: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => unreachable!(),
};
const WINDOW: Duration = Duration::from_secs(120);

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Both Riot rate-limit windows. Shared by every request the client makes.
pub struct RequestBudget {
    short: DirectLimiter,
    long: DirectLimiter,
    clock: DefaultClock,
}

impl RequestBudget {
    pub fn new() -> Self {
        Self::with_quotas(
            Quota::per_second(MAX_REQUESTS_PER_SECOND),
            Self::window_quota(MAX_REQUESTS_PER_WINDOW, WINDOW),
        )
    }

    pub fn with_quotas(short: Quota, long: Quota) -> Self {
        RequestBudget {
            short: RateLimiter::direct(short),
            long: RateLimiter::direct(long),
            clock: DefaultClock::default(),
        }
    }

    /// `burst` requests per `window`, replenished evenly.
    fn window_quota(burst: NonZeroU32, window: Duration) -> Quota {
        let period = window / burst.get();
        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }

    /// Blocks until both windows have room, then consumes one cell from each.
    /// Returns how long it waited.
    pub fn acquire(&self) -> Duration {
        let mut waited = Duration::ZERO;

        loop {
            match self.long.check() {
                Ok(()) => break,
                Err(not_until) => {
                    let wait = not_until.wait_time_from(self.clock.now());
                    tracing::warn!(wait_ms = wait.as_millis() as u64, "two-minute request budget exhausted");
                    thread::sleep(wait);
                    waited += wait;
                }
            }
        }

        loop {
            match self.short.check() {
                Ok(()) => break,
                Err(not_until) => {
                    let wait = not_until.wait_time_from(self.clock.now());
                    thread::sleep(wait);
                    waited += wait;
                }
            }
        }

        waited
    }
}

impl Default for RequestBudget {
    fn default() -> Self {
        Self::new()
    }
}
