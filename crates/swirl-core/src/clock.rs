//! Simulation clock.

use std::time::Duration;

/// How far the clock moves on each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStep {
    /// Advance by exactly one frame interval, regardless of how long the tick took.
    Fixed,
    /// Advance by the wall-clock time measured since the previous tick.
    Measured,
}

/// Monotonic simulation time.
///
/// Tracks both the number of ticks and the elapsed seconds; neither ever
/// decreases. Anything periodic derived from it is expected to wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    ticks: u64,
    seconds: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed simulation seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Advance by one tick of `delta` simulated time.
    pub fn advance(&mut self, delta: Duration) {
        self.ticks = self.ticks.saturating_add(1);
        self.seconds += delta.as_secs_f64();
    }

    /// Phase of a per-tick angular rate, wrapped into `[0, TAU)`.
    pub fn tick_phase(&self, rate: f64) -> f64 {
        (self.ticks as f64 * rate).rem_euclid(std::f64::consts::TAU)
    }

    /// Fraction of a per-tick linear rate, wrapped into `[0, 1)`.
    pub fn tick_fraction(&self, rate: f64) -> f64 {
        wrap_unit(self.ticks as f64 * rate)
    }
}

/// Wrap a value into `[0, 1)`.
///
/// `rem_euclid` can round up to exactly `1.0` for tiny negative inputs, so the
/// upper bound is enforced explicitly.
pub fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_monotonic() {
        let mut clock = SimClock::new();
        let mut last = clock.seconds();
        for ms in [0, 5, 33, 0, 1000] {
            clock.advance(Duration::from_millis(ms));
            assert!(clock.seconds() >= last);
            last = clock.seconds();
        }
        assert_eq!(clock.ticks(), 5);
    }

    #[test]
    fn tick_phase_wraps() {
        let mut clock = SimClock::new();
        for _ in 0..10_000 {
            clock.advance(Duration::ZERO);
        }
        let phase = clock.tick_phase(-0.05);
        assert!((0.0..std::f64::consts::TAU).contains(&phase));
        let fraction = clock.tick_fraction(0.005);
        assert!((0.0..1.0).contains(&fraction));
    }

    #[test]
    fn wrap_unit_never_returns_one() {
        assert_eq!(wrap_unit(-1e-20), 0.0);
        assert_eq!(wrap_unit(3.0), 0.0);
        assert!((wrap_unit(2.25) - 0.25).abs() < 1e-12);
    }
}
