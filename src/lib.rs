//! Snake Arcade - a wrap-around grid snake with power-ups and a time limit
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, placement, power-ups, session)
//! - `tuning`: Data-driven game balance and difficulty presets
//! - `settings`: Player selections (difficulty, color, name)
//! - `persistence`: Append-only score file
//! - `highscores`: Ranked scoreboard view
//! - `platform`: Wall clock and the scheduler-driven host loop

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::Scoreboard;
pub use settings::{Difficulty, Settings, SnakeColor};
pub use tuning::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Board width in cells
    pub const BOARD_WIDTH: i32 = 45;
    /// Board height in cells
    pub const BOARD_HEIGHT: i32 = 30;

    /// Round length (2 minutes)
    pub const TIME_LIMIT_MS: u64 = 2 * 60 * 1000;

    /// Nominal tick interval before the difficulty multiplier
    pub const BASE_TICK_MS: u64 = 80;
    /// Floor for the tick interval
    pub const MIN_TICK_MS: u64 = 6;

    /// Obstacles seeded on a Medium board
    pub const BASE_OBSTACLES: u32 = 4;
    /// Hard cap on obstacles per session
    pub const MAX_OBSTACLES: u32 = 80;
    /// Obstacles added per collectible picked up
    pub const OBSTACLE_STEP: u32 = 1;

    /// Per-tick power-up spawn chance
    pub const POWERUP_CHANCE: f64 = 0.005;
    /// Placed-but-unclaimed power-ups allowed on the board
    pub const POWERUP_CAP: usize = 2;
    /// How long an activated power-up stays in effect
    pub const POWERUP_DURATION_MS: u64 = 10_000;
    /// Tick interval widening while Slow is active
    pub const SLOW_FACTOR: f64 = 1.6;

    /// Rejection-sampling budget for obstacles and collectibles
    pub const PLACE_ATTEMPTS: u32 = 300;
    /// Rejection-sampling budget for power-ups
    pub const POWERUP_PLACE_ATTEMPTS: u32 = 200;

    /// Scoreboard rows shown
    pub const SCOREBOARD_ROWS: usize = 50;
    /// Name used when none is entered
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
