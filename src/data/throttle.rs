//! Per-host request spacing.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Enforces a minimum interval between request starts against one host.
///
/// Slots are reserved under the lock; the sleep happens outside it so that
/// concurrent callers queue up one interval apart.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Block until this caller may start its request.
    pub fn wait(&self) {
        let delay = self.reserve(Instant::now());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    fn reserve(&self, now: Instant) -> Duration {
        let mut slot = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
        let start = match *slot {
            Some(t) if t > now => t,
            _ => now,
        };
        *slot = Some(start + self.min_interval);
        start - now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_back_reservations_are_spaced() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let now = Instant::now();
        assert_eq!(throttle.reserve(now), Duration::ZERO);
        assert_eq!(throttle.reserve(now), Duration::from_millis(500));
        assert_eq!(throttle.reserve(now), Duration::from_millis(1000));
    }

    #[test]
    fn idle_host_is_not_delayed() {
        let throttle = Throttle::new(Duration::from_millis(200));
        let now = Instant::now();
        throttle.reserve(now);
        let later = now + Duration::from_secs(1);
        assert_eq!(throttle.reserve(later), Duration::ZERO);
    }

    #[test]
    fn zero_interval_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        let now = Instant::now();
        for _ in 0..3 {
            assert_eq!(throttle.reserve(now), Duration::ZERO);
        }
    }
}
