use super::{
    action::Direction,
    board::CellColor,
    config::GameConfig,
    food::FoodSpawner,
    levels::LevelManager,
    state::{CollisionType, GameState},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved without eating
    Moved,
    /// Ate the food; a new one has been placed
    Ate,
    /// The life is over
    Crashed(CollisionType),
    /// Ate the food but no cell is left for another one
    BoardFull,
    /// Levels mode threshold reached
    LevelComplete,
}

/// The game engine that handles all per-tick game logic
pub struct GameEngine {
    spawner: FoodSpawner,
    levels: LevelManager,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Self {
        Self::with_spawner(config, FoodSpawner::new())
    }

    pub fn with_spawner(config: &GameConfig, spawner: FoodSpawner) -> Self {
        Self {
            spawner,
            levels: LevelManager::new(config),
        }
    }

    pub fn levels(&self) -> &LevelManager {
        &self.levels
    }

    /// Place a new food item. `false` means the board is full.
    pub fn place_food(&mut self, state: &mut GameState) -> bool {
        match self.spawner.spawn(&state.board, &state.snake) {
            Ok(food) => {
                state.food = Some(food);
                state.board.paint_clipped(&[food], CellColor::Food);
                true
            }
            Err(err) => {
                log::warn!("{err}");
                state.food = None;
                false
            }
        }
    }

    /// Execute one tick of the game, steering towards `requested` if allowed
    pub fn step(&mut self, state: &mut GameState, requested: Direction) -> TickOutcome {
        // Update direction (prevent 180° turns)
        if !state.direction.is_opposite(requested) {
            state.direction = requested;
        }

        let new_head = match state.board.check(state.snake.advance(state.direction)) {
            Ok(pos) => pos,
            Err(err) => {
                log::debug!("Ran off the board: {err}");
                return TickOutcome::Crashed(CollisionType::Wall);
            }
        };

        if state.snake.will_self_intersect(new_head) {
            return TickOutcome::Crashed(CollisionType::SelfCollision);
        }

        let ate = state.food == Some(new_head);
        if let Some(vacated) = state.snake.grow(new_head, ate) {
            state.board.paint_clipped(&[vacated], CellColor::Background);
        }
        state.paint_snake();

        if !ate {
            return TickOutcome::Moved;
        }

        state.score += 1;
        log::trace!("Ate food at {:?}, score {}", new_head, state.score);

        if !self.place_food(state) {
            return TickOutcome::BoardFull;
        }

        if self.levels.is_complete(state) {
            TickOutcome::LevelComplete
        } else {
            TickOutcome::Ate
        }
    }
}
