use crate::world::layout::{crossing_row, separator_column};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i64, dy: i64) -> (i64, i64) {
        (self.x as i64 + dx, self.y as i64 + dy)
    }
}

/// Static movement legality: grid bounds plus the separator wall, which is
/// open only on the crossing row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionGate {
    width: usize,
    height: usize,
}

impl CollisionGate {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_valid_move(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        !self.is_separator(x as usize, y as usize)
    }

    pub fn is_separator(&self, x: usize, y: usize) -> bool {
        x == separator_column(self.width) && y != crossing_row(self.height)
    }

    /// Moves `pos` to (x, y) if the gate allows it.
    pub fn apply(&self, pos: &mut Position, x: i64, y: i64) -> bool {
        if !self.is_valid_move(x, y) {
            return false;
        }
        pos.x = x as usize;
        pos.y = y as usize;
        true
    }
}
