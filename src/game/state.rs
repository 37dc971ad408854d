use std::time::Duration;

use super::{
    action::Direction,
    board::{Board, CellColor},
    config::GameConfig,
};

/// A cell address on the board; row 0 is the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    /// Starting layout: `length` cells stacked downwards from the board center
    pub fn initial_segments(board_size: usize, length: usize) -> Vec<Position> {
        let center = (board_size / 2) as i32;
        (0..length as i32)
            .map(|i| Position::new(center + i, center))
            .collect()
    }

    pub fn initial(board_size: usize, length: usize) -> Self {
        Self::from_segments(Self::initial_segments(board_size, length))
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Where the head would land one step in `direction`; may be off the board
    pub fn advance(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Check whether a new head would land on any current segment
    pub fn will_self_intersect(&self, new_head: Position) -> bool {
        self.contains(new_head)
    }

    /// Prepend `new_head`, keeping the tail when the snake ate.
    /// Returns the vacated tail cell otherwise.
    pub fn grow(&mut self, new_head: Position, ate: bool) -> Option<Position> {
        self.body.insert(0, new_head);

        if ate {
            None
        } else {
            self.body.pop()
        }
    }

    /// Get the length of the snake; never zero
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake ran off the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub board: Board,
    pub score: usize,
    pub level: u32,
    /// Direction of the last move
    pub direction: Direction,
    /// Base tick interval for the current difficulty or level
    pub tick_interval: Duration,
    pub levels: bool,
}

impl GameState {
    /// Fresh state for the configured starting difficulty, at level 0
    pub fn new(config: &GameConfig) -> Self {
        let difficulty = config.starting_difficulty();
        let size = difficulty.board_size();

        let mut state = Self {
            snake: Snake::initial(size, config.initial_snake_length),
            food: None,
            board: Board::new(size),
            score: config.initial_snake_length,
            level: 0,
            direction: Direction::Up,
            tick_interval: difficulty.tick_interval(),
            levels: config.levels,
        };
        state.paint_snake();
        state
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    /// Put a fresh snake on the board for the next life
    pub fn reset_life(&mut self, initial_length: usize) {
        self.snake = Snake::initial(self.board.size(), initial_length);
        self.food = None;
        self.direction = Direction::Up;
        self.score = initial_length;
        self.paint_snake();
    }

    /// Color every snake segment
    pub fn paint_snake(&mut self) {
        self.board
            .paint_clipped(self.snake.segments(), CellColor::Snake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_initial_segments() {
        let snake = Snake::initial(15, 5);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Position::new(7, 7));
        assert_eq!(snake.tail(), Position::new(11, 7));
        for (i, seg) in snake.segments().iter().enumerate() {
            assert_eq!(*seg, Position::new(7 + i as i32, 7));
        }
    }

    #[test]
    fn test_advance_moves_one_cell() {
        let snake = Snake::initial(15, 5);
        let head = snake.head();

        assert_eq!(snake.advance(Direction::Up), Position::new(head.row - 1, head.col));
        assert_eq!(snake.advance(Direction::Down), Position::new(head.row + 1, head.col));
        assert_eq!(snake.advance(Direction::Left), Position::new(head.row, head.col - 1));
        assert_eq!(snake.advance(Direction::Right), Position::new(head.row, head.col + 1));
        // pure: nothing moved
        assert_eq!(snake.head(), head);
    }

    #[test]
    fn test_grow_without_eating_keeps_length() {
        let mut snake = Snake::initial(15, 5);
        let tail = snake.tail();
        let new_head = snake.advance(Direction::Up);

        let vacated = snake.grow(new_head, false);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), new_head);
        assert_eq!(vacated, Some(tail));
    }

    #[test]
    fn test_grow_after_eating_adds_one() {
        let mut snake = Snake::initial(15, 5);
        let tail = snake.tail();
        let new_head = snake.advance(Direction::Left);

        let vacated = snake.grow(new_head, true);

        assert_eq!(snake.len(), 6);
        assert_eq!(snake.tail(), tail);
        assert_eq!(vacated, None);
    }

    #[test]
    fn test_self_intersection() {
        let snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(5, 4),
            Position::new(6, 4),
            Position::new(6, 5),
        ]);

        assert!(snake.will_self_intersect(Position::new(6, 5)));
        assert!(snake.will_self_intersect(Position::new(5, 4)));
        assert!(!snake.will_self_intersect(Position::new(4, 5)));
        assert!(!snake.will_self_intersect(Position::new(5, 6)));
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&GameConfig::default());
        assert_eq!(state.score, 5);
        assert_eq!(state.level, 0);
        assert_eq!(state.board_size(), 15);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.tick_interval, Duration::from_millis(150));
        assert_eq!(state.food, None);
        for seg in state.snake.segments() {
            assert_eq!(state.board.get(*seg), Ok(CellColor::Snake));
        }
    }

    #[test]
    fn test_reset_life() {
        let mut state = GameState::new(&GameConfig::default());
        state.score = 12;
        state.direction = Direction::Left;
        state.food = Some(Position::new(0, 0));
        state.snake.grow(Position::new(6, 7), true);

        state.reset_life(5);

        assert_eq!(state.score, 5);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.food, None);
        assert_eq!(state.snake, Snake::initial(15, 5));
    }
}
