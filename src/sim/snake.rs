//! The snake's segmented body

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::board::{Board, Direction, Position};

/// Ordered body cells, head first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeBody {
    segments: VecDeque<Position>,
    /// Direction of the last completed move
    heading: Direction,
    /// Direction the next move will take
    pending: Direction,
}

impl SnakeBody {
    pub fn new(segments: impl IntoIterator<Item = Position>, heading: Direction) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "snake needs at least a head");
        Self {
            segments,
            heading,
            pending: heading,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction the next move will use
    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Request a turn. Reversals against the last completed move are ignored.
    /// Returns whether the request changed the pending direction.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.heading.opposite() || dir == self.pending {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Where the head lands on the next move
    pub fn next_head(&self, board: &Board) -> Position {
        board.step(self.head(), self.pending)
    }

    /// Push a new head one step along the pending direction. The tail is
    /// kept when `grow` is set, so the body gets one cell longer.
    pub fn advance(&mut self, board: &Board, grow: bool) -> Position {
        let head = self.next_head(board);
        self.heading = self.pending;
        self.segments.push_front(head);
        if !grow {
            let _ = self.segments.pop_back();
        }
        head
    }
}
