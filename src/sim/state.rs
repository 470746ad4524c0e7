//! Session state, events and the render snapshot
//!
//! A [`GameSession`] owns every piece of mutable game state. Hosts mutate it
//! only through `turn`, `toggle_pause`, `restart`, `tick` and
//! `restore_interval`, and read it through [`Snapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Direction, Position};
use super::clock::GameClock;
use super::collision::CollisionKind;
use super::entities::{EntityRegistry, Obstacle};
use super::placer::RandomPlacer;
use super::powerup::{PowerUp, PowerUpController, PowerUpKind};
use super::snake::SnakeBody;
use crate::tuning::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Board being seeded; only observed during construction or restart
    Initializing,
    /// Ticks advance the snake
    Running,
    /// Ticking suspended, state frozen
    Paused,
    /// Round ended; only `restart` leaves this phase
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    HitSelf,
    HitObstacle,
    TimeUp,
}

/// Move and pickup counters for the accuracy readout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub moves: u32,
    pub pickups: u32,
}

impl SessionStats {
    /// Percentage of moves that landed on a collectible
    pub fn accuracy(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.pickups as f64 * 100.0 / self.moves as f64
        }
    }
}

/// Things that happened, drained by the host after each call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CollectiblePicked { value: u32, gained: u64 },
    ObstaclesAdded { count: u32 },
    PowerUpSpawned { kind: PowerUpKind, pos: Position },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    /// A hit ignored because a Shield was active
    ShieldAbsorbed,
    /// The host should re-time the repeating tick
    IntervalChanged { delay_ms: u64 },
    /// The host should schedule a one-shot restoration
    RestoreScheduled { delay_ms: u64, epoch: u32, token: u32 },
    Paused,
    Resumed,
    Restarted { epoch: u32 },
    GameOver {
        score: u64,
        reason: GameOverReason,
        stats: SessionStats,
    },
}

/// A collectible as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub value: u32,
    pub tag: String,
    pub pos: Option<Position>,
}

/// The active power-up as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUpView {
    pub kind: PowerUpKind,
    pub remaining_ms: u64,
}

/// Immutable read of the session for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    /// Head first
    pub snake: Vec<Position>,
    pub heading: Direction,
    pub obstacles: Vec<Position>,
    pub collectibles: Vec<CollectibleView>,
    /// Placed, not yet claimed
    pub powerups: Vec<PowerUp>,
    pub active_powerup: Option<ActivePowerUpView>,
    pub score: u64,
    pub obstacle_count: u32,
    pub remaining_ms: u64,
    pub tick_delay_ms: u64,
    pub phase: SessionPhase,
    pub stats: SessionStats,
}

/// One full game: board, snake, entities, power-ups, clock and score
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) config: GameConfig,
    pub(super) board: Board,
    pub(super) rng: Pcg32,
    pub(super) placer: RandomPlacer,
    pub(super) snake: SnakeBody,
    pub(super) entities: EntityRegistry,
    pub(super) powerups: PowerUpController,
    pub(super) clock: GameClock,
    pub(super) score: u64,
    pub(super) obstacle_count: u32,
    pub(super) phase: SessionPhase,
    pub(super) stats: SessionStats,
    /// Bumped on every restart so stale one-shots can be recognized
    pub(super) epoch: u32,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create and seed a session that starts running at `now_ms`
    pub fn new(config: GameConfig, seed: u64, now_ms: u64) -> Self {
        let board = Board::new(config.board_width, config.board_height);
        let placer = RandomPlacer::new(board, config.place_attempts);
        let powerups = PowerUpController::new(
            config.powerup_chance,
            config.powerup_cap,
            config.powerup_duration_ms,
            RandomPlacer::new(board, config.powerup_place_attempts),
        );
        let clock = GameClock::new(config.tick_delay_ms, config.time_limit_ms, now_ms);

        let mut session = Self {
            board,
            rng: Pcg32::seed_from_u64(seed),
            placer,
            snake: initial_snake(&config),
            entities: EntityRegistry::new(&config.collectibles),
            powerups,
            clock,
            score: 0,
            obstacle_count: 0,
            phase: SessionPhase::Initializing,
            stats: SessionStats::default(),
            epoch: 0,
            events: Vec::new(),
            config,
        };
        session.initialize(now_ms);
        log::info!("Session started with seed: {}", seed);
        session
    }

    /// Seed snake, obstacles and collectibles, then start running
    fn initialize(&mut self, now_ms: u64) {
        self.phase = SessionPhase::Initializing;
        self.snake = initial_snake(&self.config);
        self.entities.clear();
        self.powerups.reset();
        self.clock.reset(now_ms);
        self.score = 0;
        self.obstacle_count = 0;
        self.stats = SessionStats::default();

        self.add_obstacles(self.config.initial_obstacles);
        self.relocate_collectibles();
        self.phase = SessionPhase::Running;
    }

    /// Raise the obstacle count by up to `count`, placing one obstacle per step
    pub(super) fn add_obstacles(&mut self, count: u32) -> u32 {
        let target = (self.obstacle_count + count).min(self.config.max_obstacles);
        let added = target - self.obstacle_count;
        for _ in 0..added {
            let placement = self
                .placer
                .place(&mut self.rng, |p| self.entities.is_occupied(&self.snake, p));
            self.entities.obstacles.push(Obstacle { pos: placement.pos });
        }
        self.obstacle_count = target;
        added
    }

    /// Move every collectible to a fresh cell
    pub(super) fn relocate_collectibles(&mut self) {
        for c in &mut self.entities.collectibles {
            c.pos = None;
        }
        for i in 0..self.entities.collectibles.len() {
            let placement = self
                .placer
                .place(&mut self.rng, |p| self.entities.is_occupied(&self.snake, p));
            self.entities.collectibles[i].pos = Some(placement.pos);
        }
    }

    /// Queue a direction change. Reversals and repeats are ignored.
    /// Turns made while paused are kept and apply on the first tick after resume.
    pub fn turn(&mut self, dir: Direction) {
        if matches!(self.phase, SessionPhase::Running | SessionPhase::Paused) {
            let _ = self.snake.turn(dir);
        }
    }

    /// Stop ticking. The round's time keeps running.
    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Running;
            self.events.push(GameEvent::Resumed);
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Start a new round. Pending restorations from the old round go stale.
    pub fn restart(&mut self, now_ms: u64) {
        self.epoch = self.epoch.wrapping_add(1);
        self.initialize(now_ms);
        self.events.push(GameEvent::Restarted { epoch: self.epoch });
        self.events.push(GameEvent::IntervalChanged {
            delay_ms: self.clock.tick_delay_ms,
        });
        log::info!("Session restarted (epoch {})", self.epoch);
    }

    /// One-shot Slow restoration. Ignored if it belongs to an earlier round
    /// or a later Slow activation has superseded it.
    pub fn restore_interval(&mut self, epoch: u32, token: u32) -> bool {
        if epoch != self.epoch || !self.powerups.is_latest_slow(token) {
            log::debug!("Ignoring stale interval restore (epoch {}, token {})", epoch, token);
            return false;
        }
        if self.clock.set_delay(self.clock.nominal_delay_ms) {
            self.events.push(GameEvent::IntervalChanged {
                delay_ms: self.clock.tick_delay_ms,
            });
        }
        true
    }

    /// Replace the snake and board contents for scripted scenarios
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, snake: SnakeBody, entities: EntityRegistry) {
        self.obstacle_count = self.obstacle_count.max(entities.obstacles.len() as u32);
        self.snake = snake;
        self.entities = entities;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        Snapshot {
            board: self.board,
            snake: self.snake.segments().copied().collect(),
            heading: self.snake.heading(),
            obstacles: self.entities.obstacles.iter().map(|o| o.pos).collect(),
            collectibles: self
                .entities
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    value: c.value,
                    tag: c.tag.clone(),
                    pos: c.pos,
                })
                .collect(),
            powerups: self.entities.powerups.clone(),
            active_powerup: self
                .powerups
                .active()
                .filter(|p| p.is_active(now_ms))
                .map(|p| ActivePowerUpView {
                    kind: p.kind,
                    remaining_ms: p.remaining_ms(now_ms),
                }),
            score: self.score,
            obstacle_count: self.obstacle_count,
            remaining_ms: self.clock.remaining_ms(now_ms),
            tick_delay_ms: self.clock.tick_delay_ms,
            phase: self.phase,
            stats: self.stats,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn obstacle_count(&self) -> u32 {
        self.obstacle_count
    }

    pub fn tick_delay_ms(&self) -> u64 {
        self.clock.tick_delay_ms
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn active_powerup(&self) -> Option<&PowerUp> {
        self.powerups.active()
    }
}

fn initial_snake(config: &GameConfig) -> SnakeBody {
    SnakeBody::new(
        config.initial_snake.iter().map(|&(x, y)| Position::new(x, y)),
        Direction::Right,
    )
}

impl GameOverReason {
    pub fn from_collision(kind: CollisionKind) -> Option<Self> {
        match kind {
            CollisionKind::None => None,
            CollisionKind::SelfHit => Some(GameOverReason::HitSelf),
            CollisionKind::ObstacleHit => Some(GameOverReason::HitObstacle),
        }
    }
}
