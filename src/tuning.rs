//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`GameConfig`], so tests
//! can shrink boards, shorten durations, or force power-up spawns.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Difficulty;

/// A collectible tier: fixed value plus a color tag for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleTier {
    pub value: u32,
    pub tag: String,
}

impl CollectibleTier {
    pub fn new(value: u32, tag: &str) -> Self {
        Self {
            value,
            tag: tag.to_string(),
        }
    }
}

/// Full simulation configuration consumed when a session initializes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_width: i32,
    pub board_height: i32,

    /// Initial body, head first, heading Right
    pub initial_snake: Vec<(i32, i32)>,

    /// Obstacles seeded at start (base count plus difficulty delta)
    pub initial_obstacles: u32,
    pub obstacle_step: u32,
    pub max_obstacles: u32,

    pub collectibles: Vec<CollectibleTier>,

    pub powerup_chance: f64,
    pub powerup_cap: usize,
    pub powerup_duration_ms: u64,
    pub slow_factor: f64,

    pub place_attempts: u32,
    pub powerup_place_attempts: u32,

    /// Nominal tick interval after the difficulty speed multiplier
    pub tick_delay_ms: u64,
    pub time_limit_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl GameConfig {
    /// Build the configuration for a difficulty preset
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let initial_obstacles =
            (BASE_OBSTACLES as i32 + difficulty.obstacle_delta()).max(0) as u32;

        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            initial_snake: vec![(5, 5), (4, 5), (3, 5)],
            initial_obstacles: initial_obstacles.min(MAX_OBSTACLES),
            obstacle_step: OBSTACLE_STEP,
            max_obstacles: MAX_OBSTACLES,
            collectibles: vec![
                CollectibleTier::new(10, "yellow"),
                CollectibleTier::new(25, "cyan"),
                CollectibleTier::new(50, "magenta"),
            ],
            powerup_chance: POWERUP_CHANCE,
            powerup_cap: POWERUP_CAP,
            powerup_duration_ms: POWERUP_DURATION_MS,
            slow_factor: SLOW_FACTOR,
            place_attempts: PLACE_ATTEMPTS,
            powerup_place_attempts: POWERUP_PLACE_ATTEMPTS,
            tick_delay_ms: tick_delay_for(difficulty.speed_multiplier()),
            time_limit_ms: TIME_LIMIT_MS,
        }
    }

    /// Tick interval while Slow is in effect
    pub fn slowed_delay_ms(&self) -> u64 {
        (self.tick_delay_ms as f64 * self.slow_factor).round() as u64
    }
}

/// Nominal interval for a speed multiplier (faster games tick sooner)
pub fn tick_delay_for(speed_multiplier: f64) -> u64 {
    let delay = (BASE_TICK_MS as f64 / speed_multiplier).round() as u64;
    delay.max(MIN_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_obstacles() {
        assert_eq!(GameConfig::for_difficulty(Difficulty::Easy).initial_obstacles, 2);
        assert_eq!(GameConfig::for_difficulty(Difficulty::Medium).initial_obstacles, 4);
        assert_eq!(GameConfig::for_difficulty(Difficulty::Hard).initial_obstacles, 8);
    }

    #[test]
    fn test_difficulty_speed() {
        let easy = GameConfig::for_difficulty(Difficulty::Easy).tick_delay_ms;
        let medium = GameConfig::for_difficulty(Difficulty::Medium).tick_delay_ms;
        let hard = GameConfig::for_difficulty(Difficulty::Hard).tick_delay_ms;
        assert_eq!(medium, BASE_TICK_MS);
        assert!(easy > medium);
        assert!(hard < medium);
    }

    #[test]
    fn test_tick_delay_floor() {
        assert_eq!(tick_delay_for(1000.0), MIN_TICK_MS);
    }

    #[test]
    fn test_slowed_delay() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.slowed_delay_ms(), 128);
    }
}
