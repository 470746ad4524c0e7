//! Power-up spawning, activation and expiry
//!
//! Any number (up to a cap) may be placed on the board, but only one is
//! ever active. Picking up a new one replaces the active one outright.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Position;
use super::entities::EntityRegistry;
use super::placer::RandomPlacer;
use super::snake::SnakeBody;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Widens the tick interval for the duration
    Slow,
    /// Ignores self and obstacle hits for the duration
    Shield,
    /// Doubles collectible value for the duration
    Multiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Slow, PowerUpKind::Shield, PowerUpKind::Multiplier];
}

/// A power-up entity, placed or active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Position,
    pub duration_ms: u64,
    pub activated_at_ms: Option<u64>,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Position, duration_ms: u64) -> Self {
        Self {
            kind,
            pos,
            duration_ms,
            activated_at_ms: None,
        }
    }

    /// In effect at `now`: activated and `now - activated_at < duration`
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.activated_at_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < self.duration_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.activated_at_ms {
            Some(at) => self.duration_ms.saturating_sub(now_ms.saturating_sub(at)),
            None => self.duration_ms,
        }
    }
}

/// Pending one-shot restoration requested by a Slow activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowRestore {
    pub token: u32,
    pub delay_ms: u64,
}

/// Owns the active power-up and the spawn policy
#[derive(Debug, Clone)]
pub struct PowerUpController {
    pub spawn_chance: f64,
    pub cap: usize,
    pub duration_ms: u64,
    pub placer: RandomPlacer,
    active: Option<PowerUp>,
    /// Token of the most recent Slow activation
    slow_token: u32,
}

impl PowerUpController {
    pub fn new(spawn_chance: f64, cap: usize, duration_ms: u64, placer: RandomPlacer) -> Self {
        Self {
            spawn_chance: spawn_chance.clamp(0.0, 1.0),
            cap,
            duration_ms,
            placer,
            active: None,
            slow_token: 0,
        }
    }

    pub fn active(&self) -> Option<&PowerUp> {
        self.active.as_ref()
    }

    pub fn is_active(&self, kind: PowerUpKind, now_ms: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| p.kind == kind && p.is_active(now_ms))
    }

    pub fn shield_active(&self, now_ms: u64) -> bool {
        self.is_active(PowerUpKind::Shield, now_ms)
    }

    /// Collectible value multiplier in effect
    pub fn score_multiplier(&self, now_ms: u64) -> u32 {
        if self.is_active(PowerUpKind::Multiplier, now_ms) { 2 } else { 1 }
    }

    /// Roll for a spawn. Places at most one power-up and returns a copy of it.
    pub fn maybe_spawn<R: Rng>(
        &self,
        rng: &mut R,
        entities: &mut EntityRegistry,
        snake: &SnakeBody,
    ) -> Option<PowerUp> {
        if entities.powerups.len() >= self.cap || !rng.random_bool(self.spawn_chance) {
            return None;
        }
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let placement = self.placer.place(rng, |p| entities.is_occupied(snake, p));
        let powerup = PowerUp::new(kind, placement.pos, self.duration_ms);
        entities.powerups.push(powerup.clone());
        Some(powerup)
    }

    /// Clear the active power-up once its duration has elapsed
    pub fn expire(&mut self, now_ms: u64) -> Option<PowerUp> {
        if self.active.as_ref().is_some_and(|p| !p.is_active(now_ms)) {
            return self.active.take();
        }
        None
    }

    /// Make `powerup` the active one, replacing any previous power-up.
    /// A Slow activation hands back the restoration to schedule.
    pub fn activate(&mut self, mut powerup: PowerUp, now_ms: u64) -> Option<SlowRestore> {
        powerup.activated_at_ms = Some(now_ms);
        let restore = if powerup.kind == PowerUpKind::Slow {
            self.slow_token = self.slow_token.wrapping_add(1);
            Some(SlowRestore {
                token: self.slow_token,
                delay_ms: powerup.duration_ms,
            })
        } else {
            None
        };
        self.active = Some(powerup);
        restore
    }

    /// Whether a restoration with `token` is the latest one issued
    pub fn is_latest_slow(&self, token: u32) -> bool {
        token == self.slow_token
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}
