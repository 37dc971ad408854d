use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use thiserror::Error;

use super::{
    board::Board,
    state::{Position, Snake},
};

/// Every cell of the board is covered by the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no empty cell left for food")]
pub struct NoSpaceError;

/// Places food uniformly at random on cells the snake does not cover
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawner, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn spawn(&mut self, board: &Board, snake: &Snake) -> Result<Position, NoSpaceError> {
        board
            .empty_cells(snake)
            .choose(&mut self.rng)
            .copied()
            .ok_or(NoSpaceError)
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_avoids_snake() {
        let board = Board::new(6);
        let snake = Snake::initial(6, 5);
        let mut spawner = FoodSpawner::seeded(7);

        for _ in 0..500 {
            let food = spawner.spawn(&board, &snake).unwrap();
            assert!(!snake.contains(food));
            assert!(board.check(food).is_ok());
        }
    }

    #[test]
    fn test_spawn_picks_last_free_cell() {
        let board = Board::new(2);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]);
        let mut spawner = FoodSpawner::seeded(1);

        assert_eq!(spawner.spawn(&board, &snake), Ok(Position::new(1, 0)));
    }

    #[test]
    fn test_spawn_on_full_board() {
        let board = Board::new(2);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(1, 0),
        ]);

        assert_eq!(FoodSpawner::new().spawn(&board, &snake), Err(NoSpaceError));
    }

    #[test]
    fn test_spawn_reaches_every_free_cell() {
        let board = Board::new(3);
        let snake = Snake::from_segments(vec![Position::new(1, 1)]);
        let mut spawner = FoodSpawner::seeded(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..400 {
            seen.insert(spawner.spawn(&board, &snake).unwrap());
        }

        assert_eq!(seen.len(), 8);
    }
}
