//! Fixed-interval simulation tick
//!
//! Order within a tick: expire the active power-up, maybe spawn one, move,
//! resolve collectible pickup, resolve power-up pickup, resolve collisions,
//! then check the time budget.

use super::board::Position;
use super::collision::{self, CollisionKind};
use super::state::{GameEvent, GameOverReason, GameSession, SessionPhase, Snapshot};

impl GameSession {
    /// Advance the session one step at `now_ms` and return what to draw.
    /// Does nothing unless the session is running.
    pub fn tick(&mut self, now_ms: u64) -> Snapshot {
        if self.phase != SessionPhase::Running {
            return self.snapshot(now_ms);
        }

        if let Some(expired) = self.powerups.expire(now_ms) {
            log::debug!("{:?} power-up expired", expired.kind);
            self.events.push(GameEvent::PowerUpExpired { kind: expired.kind });
        }

        if let Some(spawned) = self
            .powerups
            .maybe_spawn(&mut self.rng, &mut self.entities, &self.snake)
        {
            self.events.push(GameEvent::PowerUpSpawned {
                kind: spawned.kind,
                pos: spawned.pos,
            });
        }

        // Classified against the body and obstacles as they were before the move
        let candidate = self.snake.next_head(&self.board);
        let hit = collision::raw_hit(candidate, &self.snake, &self.entities);

        let grow = self.entities.collectible_at(candidate).is_some();
        let head = self.snake.advance(&self.board, grow);
        self.stats.moves += 1;

        self.resolve_collectible(head, now_ms);
        self.resolve_powerup(head, now_ms);

        let shielded = self.powerups.shield_active(now_ms);
        match collision::suppress(hit, shielded) {
            CollisionKind::None if hit.is_hit() => {
                log::debug!("Shield absorbed {:?}", hit);
                self.events.push(GameEvent::ShieldAbsorbed);
            }
            CollisionKind::None => {}
            kind => {
                if let Some(reason) = GameOverReason::from_collision(kind) {
                    self.end_game(reason);
                }
            }
        }

        if self.phase == SessionPhase::Running && self.clock.expired(now_ms) {
            self.end_game(GameOverReason::TimeUp);
        }

        self.snapshot(now_ms)
    }

    fn resolve_collectible(&mut self, head: Position, now_ms: u64) {
        let Some(index) = self.entities.collectible_at(head) else {
            return;
        };
        let value = self.entities.collectibles[index].value;
        let gained = value as u64 * self.powerups.score_multiplier(now_ms) as u64;
        self.score += gained;
        self.stats.pickups += 1;
        self.events.push(GameEvent::CollectiblePicked { value, gained });
        log::debug!("Picked up {} (+{}), score {}", value, gained, self.score);

        let added = self.add_obstacles(self.config.obstacle_step);
        if added > 0 {
            self.events.push(GameEvent::ObstaclesAdded { count: added });
        }
        self.relocate_collectibles();
    }

    fn resolve_powerup(&mut self, head: Position, now_ms: u64) {
        let Some(index) = self.entities.powerup_at(head) else {
            return;
        };
        let powerup = self.entities.powerups.remove(index);
        let kind = powerup.kind;
        log::debug!("{:?} power-up activated", kind);
        self.events.push(GameEvent::PowerUpActivated { kind });

        if let Some(restore) = self.powerups.activate(powerup, now_ms) {
            if self.clock.set_delay(self.config.slowed_delay_ms()) {
                self.events.push(GameEvent::IntervalChanged {
                    delay_ms: self.clock.tick_delay_ms,
                });
            }
            self.events.push(GameEvent::RestoreScheduled {
                delay_ms: restore.delay_ms,
                epoch: self.epoch,
                token: restore.token,
            });
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.phase = SessionPhase::GameOver;
        log::info!(
            "Game over ({:?}): score {}, {} moves, {:.2}% accuracy",
            reason,
            self.score,
            self.stats.moves,
            self.stats.accuracy()
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            reason,
            stats: self.stats,
        });
    }
}
