//! Obstacles, collectibles and placed power-ups on the board

use serde::{Deserialize, Serialize};

use super::board::Position;
use super::powerup::PowerUp;
use super::snake::SnakeBody;
use crate::tuning::CollectibleTier;

/// A single static blocked cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Position,
}

/// A scoring entity. The same instance is relocated after every pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub value: u32,
    pub tag: String,
    /// Unset until first placed
    pub pos: Option<Position>,
}

impl Collectible {
    pub fn from_tier(tier: &CollectibleTier) -> Self {
        Self {
            value: tier.value,
            tag: tier.tag.clone(),
            pos: None,
        }
    }
}

/// Current positions of everything that is not the snake
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    pub obstacles: Vec<Obstacle>,
    /// One instance per value tier
    pub collectibles: Vec<Collectible>,
    /// Placed but not yet claimed
    pub powerups: Vec<PowerUp>,
}

impl EntityRegistry {
    pub fn new(tiers: &[CollectibleTier]) -> Self {
        Self {
            obstacles: Vec::new(),
            collectibles: tiers.iter().map(Collectible::from_tier).collect(),
            powerups: Vec::new(),
        }
    }

    pub fn obstacle_at(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|o| o.pos == pos)
    }

    /// Index of the collectible sitting on `pos`
    pub fn collectible_at(&self, pos: Position) -> Option<usize> {
        self.collectibles.iter().position(|c| c.pos == Some(pos))
    }

    /// Index of the placed power-up sitting on `pos`
    pub fn powerup_at(&self, pos: Position) -> Option<usize> {
        self.powerups.iter().position(|p| p.pos == pos)
    }

    /// Whether a new entity may not go on `pos`
    pub fn is_occupied(&self, snake: &SnakeBody, pos: Position) -> bool {
        snake.contains(pos)
            || self.obstacle_at(pos)
            || self.collectible_at(pos).is_some()
            || self.powerup_at(pos).is_some()
    }

    /// Every position currently held by a non-snake entity
    pub fn placed_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.obstacles
            .iter()
            .map(|o| o.pos)
            .chain(self.collectibles.iter().filter_map(|c| c.pos))
            .chain(self.powerups.iter().map(|p| p.pos))
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.powerups.clear();
        for c in &mut self.collectibles {
            c.pos = None;
        }
    }
}
