//! Rate limiting for high-frequency terminal events.
//!
//! Handlers here are methods on the app state, so instead of wrapping a
//! callback these types act as gates: the caller asks whether to run now and
//! passes its own most recent arguments.

use std::time::{Duration, Instant};

/// Leading-edge rate limiter: lets one call through per window and drops the rest.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    window_start: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, window_start: None }
    }

    /// Returns true when a call at `now` may run, opening a new window if so.
    pub fn ready(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.interval => false,
            _ => {
                self.window_start = Some(now);
                true
            }
        }
    }

    /// Runs `f` if the gate is open at `now`; dropped calls return `None`.
    pub fn run<R>(&mut self, now: Instant, f: impl FnOnce() -> R) -> Option<R> {
        self.ready(now).then(f)
    }
}

/// Trailing-edge delay: keeps the latest value and releases it once calls go quiet.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    /// Supersedes any pending value and restarts the quiet period.
    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.quiet, value));
    }

    /// Yields the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
