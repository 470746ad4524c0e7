//! Idle/demo mode - the game steers itself
//!
//! Greedy: head for the nearest collectible (wrap-aware), never into a cell
//! that would end the game this tick.

use super::board::Direction;
use super::collision;
use super::powerup::PowerUpKind;
use super::state::{GameSession, SessionPhase};

/// Pick a turn for the next tick, or `None` when nothing safe exists
pub fn choose_direction(session: &GameSession, now_ms: u64) -> Option<Direction> {
    if session.phase() != SessionPhase::Running {
        return None;
    }

    let board = session.board();
    let snake = session.snake();
    let entities = session.entities();
    let shielded = session
        .active_powerup()
        .is_some_and(|p| p.kind == PowerUpKind::Shield && p.is_active(now_ms));

    let targets: Vec<_> = entities.collectibles.iter().filter_map(|c| c.pos).collect();

    Direction::ALL
        .into_iter()
        .filter(|&dir| dir != snake.heading().opposite())
        .filter_map(|dir| {
            let next = board.step(snake.head(), dir);
            if collision::classify(next, snake, entities, shielded).is_hit() {
                return None;
            }
            let distance = targets
                .iter()
                .map(|&t| board.wrapped_distance(next, t))
                .min()
                .unwrap_or(0);
            // Prefer keeping the current heading on ties
            let keep = if dir == snake.pending() { 0 } else { 1 };
            Some((distance, keep, dir))
        })
        .min_by_key(|&(distance, keep, _)| (distance, keep))
        .map(|(_, _, dir)| dir)
}
