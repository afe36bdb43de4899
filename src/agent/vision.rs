use crate::world::cell::TargetKind;
use crate::world::GridQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    /// Next direction clockwise: up, right, down, left.
    pub fn clockwise(self) -> Self {
        match self {
            Facing::Up => Facing::Right,
            Facing::Right => Facing::Down,
            Facing::Down => Facing::Left,
            Facing::Left => Facing::Up,
        }
    }

    /// Direction pointing along the dominant axis of (dx, dy).
    /// Ties go to the vertical axis.
    pub fn toward(dx: i64, dy: i64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if dy > 0 {
            Facing::Down
        } else {
            Facing::Up
        }
    }
}

/// Something the agent has spotted and is hunting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseTarget {
    pub x: usize,
    pub y: usize,
    pub kind: TargetKind,
    pub entity: u32,
    /// Agent tick on which this entity was first spotted.
    pub spotted_at: u64,
}

impl ChaseTarget {
    pub fn same_entity(&self, kind: TargetKind, entity: u32) -> bool {
        self.kind == kind && self.entity == entity
    }
}

/// Window sizes of the two vision modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionRanges {
    pub base_size: i64,
    pub stress_size: i64,
    pub forward_length: i64,
}

impl Default for VisionRanges {
    fn default() -> Self {
        Self {
            base_size: 6,
            stress_size: 12,
            forward_length: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vision {
    ranges: VisionRanges,
    stress_mode: bool,
}

impl Vision {
    pub fn new(ranges: VisionRanges) -> Self {
        Self {
            ranges,
            stress_mode: false,
        }
    }

    pub fn stress_mode(&self) -> bool {
        self.stress_mode
    }

    /// Switches stress mode. Returns true if the mode actually changed.
    pub fn set_stress_mode(&mut self, active: bool) -> bool {
        let changed = self.stress_mode != active;
        self.stress_mode = active;
        changed
    }

    /// Whether offset (dx, dy) from the agent is visible.
    pub fn covers(&self, dx: i64, dy: i64, facing: Facing) -> bool {
        if self.stress_mode {
            let r = self.ranges.stress_size / 2;
            return dx.abs() <= r && dy.abs() <= r;
        }

        let r = self.ranges.base_size / 2;
        if dx.abs() <= r && dy.abs() <= r {
            return true;
        }

        let depth = 1..=self.ranges.forward_length;
        match facing {
            Facing::Right => depth.contains(&dx) && dy.abs() <= r,
            Facing::Left => depth.contains(&-dx) && dy.abs() <= r,
            Facing::Down => depth.contains(&dy) && dx.abs() <= r,
            Facing::Up => depth.contains(&-dy) && dx.abs() <= r,
        }
    }

    fn reach(&self) -> i64 {
        if self.stress_mode {
            self.ranges.stress_size / 2
        } else {
            (self.ranges.base_size / 2).max(self.ranges.forward_length)
        }
    }

    /// Visible cells, clipped to the grid, in row-major order (y, then x).
    pub fn cells(&self, x: usize, y: usize, facing: Facing, dimensions: (usize, usize)) -> Vec<(usize, usize)> {
        let (width, height) = (dimensions.0 as i64, dimensions.1 as i64);
        let reach = self.reach();
        let mut cells = Vec::new();

        for dy in -reach..=reach {
            let ny = y as i64 + dy;
            if ny < 0 || ny >= height {
                continue;
            }
            for dx in -reach..=reach {
                let nx = x as i64 + dx;
                if nx < 0 || nx >= width {
                    continue;
                }
                if self.covers(dx, dy, facing) {
                    cells.push((nx as usize, ny as usize));
                }
            }
        }

        cells
    }

    /// First food or rat in visible-cell order, as (x, y, kind, entity).
    pub fn first_target<G: GridQuery>(
        &self,
        x: usize,
        y: usize,
        facing: Facing,
        grid: &G,
    ) -> Option<(usize, usize, TargetKind, u32)> {
        self.cells(x, y, facing, grid.dimensions())
            .into_iter()
            .find_map(|(cx, cy)| {
                grid.cell_at(cx, cy)
                    .target()
                    .map(|(kind, entity)| (cx, cy, kind, entity))
            })
    }
}
