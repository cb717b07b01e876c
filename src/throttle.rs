//! Leading/trailing rate limiter.
//!
//! The first call after a quiet period fires immediately. Calls that land
//! inside the interval are collapsed into one trailing call carrying the most
//! recent value, released by `poll` once the interval has passed.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: None,
        }
    }

    /// Offer a call. Returns the value back if it should run now; otherwise it
    /// replaces any earlier pending value.
    pub fn schedule(&mut self, now: Instant, value: T) -> Option<T> {
        if self.is_open(now) {
            self.last_fired = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the trailing call if one is waiting and its time has come.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.is_open(now) {
            self.last_fired = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// When the pending trailing call becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        match (&self.pending, self.last_fired) {
            (Some(_), Some(last)) => Some(last + self.interval),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_open(&self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }
}
