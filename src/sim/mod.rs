//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as `now_ms` arguments
//! - Seeded RNG only
//! - Stable iteration order (body order, tier order, placement order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod board;
pub mod clock;
pub mod collision;
pub mod entities;
pub mod placer;
pub mod powerup;
pub mod schedule;
pub mod snake;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use board::{Board, Direction, Position};
pub use clock::GameClock;
pub use collision::{CollisionKind, classify};
pub use entities::{Collectible, EntityRegistry, Obstacle};
pub use placer::{Placement, RandomPlacer};
pub use powerup::{PowerUp, PowerUpController, PowerUpKind};
pub use schedule::{Fired, Scheduler, Task, TaskId};
pub use snake::SnakeBody;
pub use state::{
    ActivePowerUpView, CollectibleView, GameEvent, GameOverReason, GameSession, SessionPhase,
    SessionStats, Snapshot,
};
