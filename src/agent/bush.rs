use super::chem::{bush_pool, ChemicalPools};
use crate::world::cell::BushId;
use crate::world::{BushInfo, GridQuery};
use serde::{Deserialize, Serialize};

/// Visits that mark a bush as done.
pub const BUSH_GOAL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BushCredit {
    pub bush: BushId,
    pub progress: u8,
    /// True when this credit finished the last bush and everything was reset.
    pub reset: bool,
}

/// Per-bush visit counters, indexed by `BushId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BushTracker {
    labels: Vec<String>,
    progress: Vec<u8>,
    completed: usize,
    radius: usize,
}

impl BushTracker {
    pub fn new(bushes: &[BushInfo], radius: usize) -> Self {
        let labels: Vec<String> = bushes.iter().map(|b| b.label.clone()).collect();
        let progress = vec![0; labels.len()];
        Self {
            labels,
            progress,
            completed: 0,
            radius,
        }
    }

    pub fn progress(&self, bush: BushId) -> u8 {
        self.progress.get(bush.0).copied().unwrap_or(0)
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn len(&self) -> usize {
        self.progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }

    fn is_incomplete(&self, bush: BushId) -> bool {
        bush.0 < self.progress.len() && self.progress[bush.0] < BUSH_GOAL
    }

    /// Credits the first unfinished bush within the interaction radius of
    /// (x, y). At most one bush is credited per call.
    pub fn check_proximity<G: GridQuery>(
        &mut self,
        x: usize,
        y: usize,
        grid: &G,
        pools: &mut ChemicalPools,
    ) -> Option<BushCredit> {
        let r = self.radius as i64;

        for dy in -r..=r {
            for dx in -r..=r {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if !grid.in_bounds(nx, ny) {
                    continue;
                }
                let Some(bush) = grid.cell_at(nx as usize, ny as usize).bush() else {
                    continue;
                };
                if self.is_incomplete(bush) {
                    return Some(self.credit(bush, pools));
                }
            }
        }

        None
    }

    fn credit(&mut self, bush: BushId, pools: &mut ChemicalPools) -> BushCredit {
        self.progress[bush.0] += 1;
        let progress = self.progress[bush.0];
        pools.add(&bush_pool(&self.labels[bush.0]), 1.0);

        let mut reset = false;
        if progress == BUSH_GOAL {
            self.completed += 1;
            if self.completed == self.progress.len() {
                self.reset_all(pools);
                reset = true;
            }
        }

        BushCredit { bush, progress, reset }
    }

    /// Clears every counter and drains each mirror pool by the goal.
    pub fn reset_all(&mut self, pools: &mut ChemicalPools) {
        for (progress, label) in self.progress.iter_mut().zip(&self.labels) {
            *progress = 0;
            pools.reduce(&bush_pool(label), BUSH_GOAL as f64);
        }
        self.completed = 0;
    }

    /// Nearest cell (Euclidean) of an unfinished bush. Ties keep the first
    /// cell found in row-major order.
    pub fn find_nearest_incomplete<G: GridQuery>(&self, x: usize, y: usize, grid: &G) -> Option<(usize, usize)> {
        let (width, height) = grid.dimensions();
        let mut nearest = None;
        let mut best = f64::INFINITY;

        for cy in 0..height {
            for cx in 0..width {
                let Some(bush) = grid.cell_at(cx, cy).bush() else {
                    continue;
                };
                if !self.is_incomplete(bush) {
                    continue;
                }
                let ddx = cx as f64 - x as f64;
                let ddy = cy as f64 - y as f64;
                let distance = (ddx * ddx + ddy * ddy).sqrt();
                if distance < best {
                    best = distance;
                    nearest = Some((cx, cy));
                }
            }
        }

        nearest
    }
}
