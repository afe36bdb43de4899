use crate::world::cell::TargetKind;
use crate::world::GridQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the pool tracking hunting stress.
pub const STRESS: &str = "stress";

/// Name of the pool mirroring visits to the bush labelled `label`.
pub fn bush_pool(label: &str) -> String {
    format!("bush_done_{}", label)
}

/// A named, non-negative scalar signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalPool {
    name: String,
    value: f64,
}

impl ChemicalPool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Raises the value. Negative amounts are ignored; use `reduce` to lower it.
    pub fn add(&mut self, amount: f64) {
        self.value += amount.max(0.0);
    }

    /// Lowers the value, flooring at zero.
    pub fn reduce(&mut self, amount: f64) {
        self.value = (self.value - amount).max(0.0);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChemicalPools {
    pools: BTreeMap<String, ChemicalPool>,
}

impl ChemicalPools {
    pub fn new() -> Self {
        let mut pools = Self::default();
        pools.pool_mut(STRESS);
        pools
    }

    /// Snapshot of a pool. Unknown names read as an empty pool.
    pub fn get(&self, name: &str) -> ChemicalPool {
        self.pools
            .get(name)
            .cloned()
            .unwrap_or_else(|| ChemicalPool::new(name))
    }

    pub fn value(&self, name: &str) -> f64 {
        self.pools.get(name).map(|p| p.value()).unwrap_or(0.0)
    }

    pub fn pool_mut(&mut self, name: &str) -> &mut ChemicalPool {
        self.pools
            .entry(name.to_string())
            .or_insert_with(|| ChemicalPool::new(name))
    }

    pub fn add(&mut self, name: &str, amount: f64) {
        self.pool_mut(name).add(amount);
    }

    pub fn reduce(&mut self, name: &str, amount: f64) {
        self.pool_mut(name).reduce(amount);
    }

    pub fn stress(&self) -> f64 {
        self.value(STRESS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChemicalPool> {
        self.pools.values()
    }

    /// Raises stress for every food or rat within `radius` of (x, y).
    /// Returns the amount added.
    pub fn sense_surroundings<G: GridQuery>(&mut self, grid: &G, x: usize, y: usize, radius: usize) -> f64 {
        let r = radius as i64;
        let mut total = 0.0;

        for dy in -r..=r {
            for dx in -r..=r {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if !grid.in_bounds(nx, ny) {
                    continue;
                }
                if let Some((kind, _)) = grid.cell_at(nx as usize, ny as usize).target() {
                    total += kind.stress();
                }
            }
        }

        if total > 0.0 {
            self.add(STRESS, total);
        }
        total
    }

    pub(crate) fn drain_for(&mut self, kind: TargetKind) {
        self.reduce(STRESS, kind.stress());
    }
}
