//! Outbound call rate limiting
//!
//! The quote provider enforces a strict request budget, so all provider
//! calls funnel through one limiter that spaces them out by a minimum
//! interval. The stamp is taken inside the permitted check, before the
//! network call is issued, so a slow or failed request still consumes its
//! slot and two concurrent checks can never both pass for the same slot.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Minimum-interval limiter for outbound provider calls.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with no call on record, so the first acquire
    /// always succeeds.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Try to claim the next call slot.
    ///
    /// Returns `Ok(())` and stamps the slot when at least `min_interval`
    /// has passed since the previous stamp; otherwise returns the time
    /// remaining until a slot opens. Check and stamp happen under one
    /// lock.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let mut last_call = self.last_call.lock();

        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                return Err(self.min_interval - elapsed);
            }
        }

        *last_call = Some(Instant::now());
        Ok(())
    }

    /// Time until the next acquire would succeed.
    pub fn time_until_available(&self) -> Duration {
        let last_call = self.last_call.lock();
        match *last_call {
            Some(last) => self.min_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }
}
