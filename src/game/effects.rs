//! Geometry and timing of the end-of-life animation.

use rand::Rng;
use std::time::Duration;

use super::{board::CellColor, state::Position};

/// Delay after lighting segment `index` of a `len`-long snake:
/// `base · e^(-5·index/len)`, truncated to whole milliseconds
pub fn chase_delay(base_ms: u64, index: usize, len: usize) -> Duration {
    let exponent = -5.0 * index as f64 / len.max(1) as f64;
    Duration::from_millis((exponent.exp() * base_ms as f64) as u64)
}

/// Segments lit at once while the chase runs from head to tail
pub const CHASE_WIDTH: usize = 3;

/// Outline of a square with odd side length centered on `center`,
/// walked top, right, bottom, left
pub fn square_outline(center: Position, side: usize) -> Vec<Position> {
    let half = (side / 2) as i32;
    let top = center.row - half;
    let bottom = center.row + half;
    let left = center.col - half;
    let right = center.col + half;

    let mut points = Vec::with_capacity(side * 4);
    for i in 0..side as i32 {
        points.push(Position::new(top, left + i));
    }
    for i in 0..side as i32 {
        points.push(Position::new(top + i, right));
    }
    for i in 0..side as i32 {
        points.push(Position::new(bottom, left + i));
    }
    for i in 0..side as i32 {
        points.push(Position::new(top + i, left));
    }
    points
}

/// Whether the explosion wipes the board before drawing this side length.
/// Alternates: 5 keeps, 7 clears, 9 keeps, 11 clears...
pub fn explosion_clears(side: usize) -> bool {
    side % 4 > 1
}

/// Frame delay of the explosion; larger boards expand faster
pub fn explosion_frame_delay(budget_ms: u64, board_size: usize) -> Duration {
    Duration::from_millis(budget_ms / board_size.max(1) as u64)
}

/// A saturated spark of random hue
pub fn random_spark<R: Rng + ?Sized>(rng: &mut R) -> CellColor {
    CellColor::Spark {
        hue: rng.gen_range(0.0..360.0),
    }
}
