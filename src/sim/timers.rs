//! Named countdown and cadence handles
//!
//! Every duration in the simulation is a tick count advanced exactly once per
//! tick by each state's scheduler pass. No wall-clock callbacks exist anywhere
//! in the sim, so runs stay deterministic and pausable.

use serde::{Deserialize, Serialize};

/// One-shot countdown. Idle at zero; `tick` reports the tick it expires on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// Start (or restart) the countdown at `ticks`.
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn cancel(&mut self) {
        self.remaining = 0;
    }

    /// Advance one tick. Returns true only on the tick the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Repeating timer that fires every `period` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    period: u32,
    elapsed: u32,
}

impl Cadence {
    pub const fn new(period: u32) -> Self {
        Self { period, elapsed: 0 }
    }

    /// Advance one tick. Returns true on each tick the period elapses.
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Ticks until the next firing.
    pub fn remaining(&self) -> u32 {
        self.period - self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_once() {
        let mut c = Countdown::idle();
        assert!(!c.active());
        assert!(!c.tick());

        c.arm(3);
        assert!(c.active());
        assert!(!c.tick());
        assert!(!c.tick());
        assert!(c.tick()); // expires on the third tick
        assert!(!c.tick()); // and never again
        assert!(!c.active());
    }

    #[test]
    fn test_countdown_rearm_overrides() {
        let mut c = Countdown::idle();
        c.arm(10);
        c.tick();
        c.arm(2);
        assert_eq!(c.remaining(), 2);
        assert!(!c.tick());
        assert!(c.tick());
    }

    #[test]
    fn test_cadence_fires_every_period() {
        let mut c = Cadence::new(4);
        let fires: Vec<bool> = (0..8).map(|_| c.tick()).collect();
        assert_eq!(fires, [false, false, false, true, false, false, false, true]);
    }

    #[test]
    fn test_cadence_remaining_counts_down() {
        let mut c = Cadence::new(3);
        assert_eq!(c.remaining(), 3);
        c.tick();
        assert_eq!(c.remaining(), 2);
        c.tick();
        assert_eq!(c.remaining(), 1);
        c.tick();
        assert_eq!(c.remaining(), 3);
    }
}
