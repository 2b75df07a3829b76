use instant::Instant;
use std::time::Duration;

/// Minimum-interval gate for high-frequency input such as pointer moves.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true when an event arriving at `now` should be processed.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now >= last && now.duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
