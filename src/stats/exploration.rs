use crate::world::GridQuery;
use serde::{Deserialize, Serialize};

/// Cells the agent has seen holding something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationMap {
    width: usize,
    height: usize,
    seen: Vec<bool>,
}

impl ExplorationMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seen: vec![false; width * height],
        }
    }

    /// Marks every occupied cell among `visible`.
    pub fn update<G: GridQuery>(&mut self, visible: &[(usize, usize)], grid: &G) {
        for &(x, y) in visible {
            if x >= self.width || y >= self.height {
                continue;
            }
            if !grid.cell_at(x, y).is_empty() {
                self.seen[y * self.width + x] = true;
            }
        }
    }

    pub fn is_seen(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.seen[y * self.width + x]
    }

    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }

    /// Share of the occupied cells of `grid` seen so far.
    pub fn coverage<G: GridQuery>(&self, grid: &G) -> f64 {
        let (width, height) = grid.dimensions();
        let mut occupied = 0;
        let mut seen = 0;
        for y in 0..height {
            for x in 0..width {
                if !grid.cell_at(x, y).is_empty() {
                    occupied += 1;
                    if self.is_seen(x, y) {
                        seen += 1;
                    }
                }
            }
        }
        if occupied == 0 {
            return 0.0;
        }
        seen as f64 / occupied as f64
    }
}
