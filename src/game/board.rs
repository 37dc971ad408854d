//! The square grid of colored cells the game draws on.

use thiserror::Error;

use super::state::{Position, Snake};

/// Display color of one cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CellColor {
    #[default]
    Background,
    Snake,
    Food,
    /// Head-to-tail chase after a completed level
    Victory,
    /// Head-to-tail chase after a loss
    Defeat,
    /// Explosion particle, hue in degrees
    Spark { hue: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position ({}, {}) is outside the {size}x{size} board", .pos.row, .pos.col)]
pub struct BoundsError {
    pub pos: Position,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: usize,
    cells: Vec<CellColor>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            size,
            cells: vec![CellColor::Background; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the position back if it lies on the board
    pub fn check(&self, pos: Position) -> Result<Position, BoundsError> {
        self.index(pos).map(|_| pos)
    }

    pub fn get(&self, pos: Position) -> Result<CellColor, BoundsError> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: Position, color: CellColor) -> Result<(), BoundsError> {
        let i = self.index(pos)?;
        self.cells[i] = color;
        Ok(())
    }

    /// Color every on-board position, skipping the rest
    pub fn paint_clipped(&mut self, positions: &[Position], color: CellColor) {
        for pos in positions {
            if let Ok(i) = self.index(*pos) {
                self.cells[i] = color;
            }
        }
    }

    pub fn is_occupied_by_snake(&self, pos: Position, snake: &Snake) -> bool {
        snake.contains(pos)
    }

    /// Every cell the snake does not cover, row by row
    pub fn empty_cells(&self, snake: &Snake) -> Vec<Position> {
        let size = self.size as i32;
        (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .filter(|pos| !self.is_occupied_by_snake(*pos, snake))
            .collect()
    }

    /// Reallocate at a new size; every cell goes back to background
    pub fn resize(&mut self, new_size: usize) {
        *self = Board::new(new_size);
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellColor::Background);
    }

    pub fn is_all_background(&self) -> bool {
        self.cells.iter().all(|c| *c == CellColor::Background)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[CellColor] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    fn index(&self, pos: Position) -> Result<usize, BoundsError> {
        let size = self.size as i32;
        if pos.row < 0 || pos.row >= size || pos.col < 0 || pos.col >= size {
            return Err(BoundsError {
                pos,
                size: self.size,
            });
        }
        Ok(pos.row as usize * self.size + pos.col as usize)
    }
}
