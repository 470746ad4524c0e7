//! Head collision classification
//!
//! Evaluated against the body as it was before the move, so every non-head
//! segment (tail included) counts as a hit.

use super::board::Position;
use super::entities::EntityRegistry;
use super::snake::SnakeBody;

/// Outcome of testing a candidate head cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    None,
    SelfHit,
    ObstacleHit,
}

impl CollisionKind {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionKind::None)
    }
}

/// Classify `candidate` against the pre-move body and the obstacles.
/// An active shield suppresses both hit kinds.
pub fn classify(
    candidate: Position,
    body: &SnakeBody,
    entities: &EntityRegistry,
    shield_active: bool,
) -> CollisionKind {
    suppress(raw_hit(candidate, body, entities), shield_active)
}

/// Apply an active shield to an already computed classification
pub fn suppress(kind: CollisionKind, shield_active: bool) -> CollisionKind {
    if shield_active { CollisionKind::None } else { kind }
}

/// Classification ignoring any shield
pub fn raw_hit(candidate: Position, body: &SnakeBody, entities: &EntityRegistry) -> CollisionKind {
    if body.segments().skip(1).any(|&s| s == candidate) {
        return CollisionKind::SelfHit;
    }
    if entities.obstacle_at(candidate) {
        return CollisionKind::ObstacleHit;
    }
    CollisionKind::None
}
