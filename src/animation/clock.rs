use std::time::{Duration, Instant};

/// Source of time for animation drivers.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Suspend for `d` (or pretend to).
    fn sleep(&mut self, d: Duration);
}

/// Real wall-clock time; `sleep` blocks the current thread.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}

/// Clock that advances instantly; used for tests and offline export.
#[derive(Debug, Default, Clone)]
pub struct VirtualClock {
    now: Duration,
    sleeps: usize,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `sleep` calls observed.
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, d: Duration) {
        self.now += d;
        self.sleeps += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
