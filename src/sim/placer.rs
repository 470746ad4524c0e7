//! Rejection-sampling placement of single cells

use rand::Rng;

use super::board::{Board, Position};

/// Result of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub pos: Position,
    /// False when the attempt budget ran out and `pos` may overlap something
    pub free: bool,
}

/// Samples uniformly random cells until one is unoccupied
#[derive(Debug, Clone, Copy)]
pub struct RandomPlacer {
    pub board: Board,
    pub max_attempts: u32,
}

impl RandomPlacer {
    pub fn new(board: Board, max_attempts: u32) -> Self {
        Self {
            board,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Return the first sampled cell for which `occupied` is false.
    ///
    /// Once `max_attempts` samples are exhausted the last sampled cell is
    /// returned anyway, so a crowded board yields an overlapping placement
    /// rather than a failure.
    pub fn place<R, F>(&self, rng: &mut R, occupied: F) -> Placement
    where
        R: Rng,
        F: Fn(Position) -> bool,
    {
        let mut pos = self.sample(rng);
        for _ in 1..self.max_attempts {
            if !occupied(pos) {
                return Placement { pos, free: true };
            }
            pos = self.sample(rng);
        }
        let free = !occupied(pos);
        if !free {
            log::warn!(
                "Placement gave up after {} attempts, accepting overlap at ({}, {})",
                self.max_attempts,
                pos.x,
                pos.y
            );
        }
        Placement { pos, free }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.board.width),
            rng.random_range(0..self.board.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_place_avoids_occupied() {
        let board = Board::new(4, 4);
        let placer = RandomPlacer::new(board, 300);
        let mut rng = Pcg32::seed_from_u64(1);
        let blocked = Position::new(1, 1);

        for _ in 0..50 {
            let placement = placer.place(&mut rng, |p| p.x < 3 || p == blocked);
            assert!(placement.free);
            assert_eq!(placement.pos.x, 3);
            assert!(board.contains(placement.pos));
        }
    }

    #[test]
    fn test_exhaustion_accepts_overlap() {
        let board = Board::new(5, 5);
        let placer = RandomPlacer::new(board, 10);
        let mut rng = Pcg32::seed_from_u64(2);

        let placement = placer.place(&mut rng, |_| true);
        assert!(!placement.free);
        assert!(board.contains(placement.pos));
    }

    #[test]
    fn test_placement_is_reproducible() {
        let placer = RandomPlacer::new(Board::new(45, 30), 300);
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(placer.place(&mut a, |_| false), placer.place(&mut b, |_| false));
        }
    }
}
