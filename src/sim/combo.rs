//! Time-windowed combo counter

use serde::{Deserialize, Serialize};

/// Consecutive hits inside the combo window raise the score multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    /// Hits chained so far
    pub count: u32,
    /// Ticks left before the chain breaks (0 = no chain running)
    pub countdown: u32,
}

impl Combo {
    /// Multiplier for the next hit
    pub fn multiplier(&self) -> u32 {
        self.count.max(1)
    }

    /// Record a hit and restart the window
    pub fn register_hit(&mut self, window_ticks: u32) {
        self.count = self.count.saturating_add(1);
        self.countdown = window_ticks;
    }

    /// Advance one tick; the chain resets exactly when the countdown hits zero
    pub fn tick(&mut self) {
        if self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown == 0 {
                self.count = 0;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
