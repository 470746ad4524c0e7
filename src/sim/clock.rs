//! Tick interval and the round's time budget
//!
//! Elapsed time is wall time since the round started. Pausing stops ticks,
//! not the clock, so a round paused past its limit ends on the next tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    /// Difficulty-derived interval the game returns to after Slow
    pub nominal_delay_ms: u64,
    /// Interval currently in effect
    pub tick_delay_ms: u64,
    pub time_limit_ms: u64,
    pub started_at_ms: u64,
}

impl GameClock {
    pub fn new(nominal_delay_ms: u64, time_limit_ms: u64, now_ms: u64) -> Self {
        Self {
            nominal_delay_ms,
            tick_delay_ms: nominal_delay_ms,
            time_limit_ms,
            started_at_ms: now_ms,
        }
    }

    /// Re-arm for a fresh round at the nominal interval
    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::new(self.nominal_delay_ms, self.time_limit_ms, now_ms);
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.time_limit_ms
    }

    /// Switch to a new interval. Returns false if it was already in effect.
    pub fn set_delay(&mut self, delay_ms: u64) -> bool {
        if self.tick_delay_ms == delay_ms {
            return false;
        }
        self.tick_delay_ms = delay_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_and_expiry() {
        let clock = GameClock::new(80, 1000, 500);
        assert_eq!(clock.elapsed_ms(900), 400);
        assert_eq!(clock.remaining_ms(900), 600);
        assert!(!clock.expired(1499));
        assert!(clock.expired(1500));
        assert_eq!(clock.remaining_ms(5000), 0);
    }

    #[test]
    fn test_elapsed_is_wall_time() {
        let clock = GameClock::new(80, 1000, 100);
        assert_eq!(clock.elapsed_ms(5000), 4900);
        assert!(clock.expired(1100));
        assert_eq!(clock.elapsed_ms(50), 0);
    }

    #[test]
    fn test_reset_restores_nominal() {
        let mut clock = GameClock::new(80, 1000, 0);
        assert!(clock.set_delay(128));
        assert!(!clock.set_delay(128));
        clock.reset(2000);
        assert_eq!(clock.tick_delay_ms, 80);
        assert_eq!(clock.elapsed_ms(2100), 100);
    }
}
