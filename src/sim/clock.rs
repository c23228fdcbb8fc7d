//! Fixed-step simulation clock
//!
//! Host timers and animation frames fire at uneven intervals. The clock turns
//! elapsed wall time into a whole number of fixed ticks and carries the rest.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

#[derive(Debug, Clone)]
pub struct FixedClock {
    step_ms: f64,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(TICK_MS)
    }
}

impl FixedClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms: step_ms.max(1.0),
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Feed a host timestamp (ms). The first call only primes the clock.
    pub fn advance_to(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => now_ms - last,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.advance(elapsed)
    }

    /// Add elapsed wall time and return how many ticks are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed_ms.min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= self.step_ms && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step_ms;
            substeps += 1;
        }
        substeps
    }

    /// Drop carried time (after start/reset so a stale remainder can't fire a tick)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_and_remainder() {
        let mut clock = FixedClock::new(16.0);
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(10.0), 1); // 20 accumulated
        assert_eq!(clock.advance(12.0), 1); // 4 + 12
        assert_eq!(clock.advance(48.0), 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FixedClock::new(16.0);
        // 5 seconds away from the tab must not replay 300 ticks
        let ticks = clock.advance(5000.0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert_eq!(ticks, (MAX_FRAME_MS / 16.0) as u32);
    }

    #[test]
    fn test_timestamps_prime_then_advance() {
        let mut clock = FixedClock::new(16.0);
        assert_eq!(clock.advance_to(1000.0), 0);
        assert_eq!(clock.advance_to(1016.0), 1);
        assert_eq!(clock.advance_to(1016.0), 0);
        assert_eq!(clock.advance_to(1000.0), 0); // clock went backwards
    }

    #[test]
    fn test_garbage_elapsed_is_ignored() {
        let mut clock = FixedClock::new(16.0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.advance(-20.0), 0);
        assert_eq!(clock.advance(16.0), 1);
    }
}
