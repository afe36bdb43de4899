pub mod cell;
pub mod layout;
pub mod rat;

use cell::{BushColor, BushId, Cell};
use rand::Rng;
use rat::{PatrolBox, Rat};
use serde::{Deserialize, Serialize};

/// Grid access the agent needs from whatever owns the world.
pub trait GridQuery {
    /// (width, height) of the grid.
    fn dimensions(&self) -> (usize, usize);

    /// Cell contents at (x, y). Callers stay inside `dimensions()`.
    fn cell_at(&self, x: usize, y: usize) -> Cell;

    /// Clears whatever occupies (x, y).
    fn remove_at(&mut self, x: usize, y: usize);

    /// Marks the rat with `id` dead. Returns false if no live rat has that id.
    fn capture_rat(&mut self, id: u32) -> bool;

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        let (width, height) = self.dimensions();
        x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BushInfo {
    pub id: BushId,
    pub label: String,
    pub color: BushColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: usize,
    height: usize,
    grid: Vec<Cell>,
    bushes: Vec<BushInfo>,
    rats: Vec<Rat>,
    next_entity_id: u32,
}

/// Height of a world `grid_size` cells wide: 30% taller than wide.
pub fn grid_height_for(grid_size: usize) -> usize {
    (grid_size as f64 * 1.3).round() as usize
}

impl World {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![Cell::Empty; width * height],
            bushes: Vec::new(),
            rats: Vec::new(),
            next_entity_id: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        self.grid.get_mut(idx)
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(c) = self.get_mut(x, y) {
            *c = cell;
        }
    }

    pub fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> usize {
        self.grid.iter().filter(|c| predicate(c)).count()
    }

    /// Every occupied cell with its coordinates, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(move |(idx, c)| (idx % self.width, idx / self.width, *c))
    }

    pub fn food_remaining(&self) -> usize {
        self.count_cells(|c| matches!(c, Cell::Food { .. }))
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Adds a bush to the registry. Its cells are placed with `place_bush`.
    pub fn register_bush(&mut self, label: impl Into<String>, color: BushColor) -> BushId {
        let id = BushId(self.bushes.len());
        self.bushes.push(BushInfo {
            id,
            label: label.into(),
            color,
        });
        id
    }

    pub fn place_bush(&mut self, x: usize, y: usize, id: BushId) {
        if let Some(info) = self.bushes.get(id.0) {
            let color = info.color;
            self.set(x, y, Cell::Bush { id, color });
        }
    }

    pub fn bushes(&self) -> &[BushInfo] {
        &self.bushes
    }

    pub fn spawn_food(&mut self, x: usize, y: usize) -> u32 {
        let id = self.next_id();
        self.set(x, y, Cell::Food { id });
        id
    }

    pub fn spawn_rat(&mut self, x: usize, y: usize, patrol_radius: usize) -> u32 {
        let id = self.next_id();
        let patrol = PatrolBox::around(x, y, patrol_radius, self.width, self.height);
        self.rats.push(Rat::new(id, x, y, patrol));
        self.set(x, y, Cell::Rat { id });
        id
    }

    pub fn rats(&self) -> &[Rat] {
        &self.rats
    }

    pub fn live_rats(&self) -> impl Iterator<Item = &Rat> {
        self.rats.iter().filter(|r| r.is_alive())
    }

    /// Teleports every live rat to a free cell of its patrol box.
    pub fn move_rats<R: Rng>(&mut self, rng: &mut R) {
        let mut rats = std::mem::take(&mut self.rats);

        for rat in rats.iter_mut().filter(|r| r.is_alive()) {
            let (old_x, old_y) = (rat.x, rat.y);
            if rat.relocate(rng, |x, y| self.get(x, y).map(|c| c.is_empty()).unwrap_or(false)) {
                if self.get(old_x, old_y) == Some(&Cell::Rat { id: rat.id }) {
                    self.set(old_x, old_y, Cell::Empty);
                }
                self.set(rat.x, rat.y, Cell::Rat { id: rat.id });
            }
        }

        self.rats = rats;
    }

    /// Drops dead rats from the roster. Returns how many were removed.
    pub fn prune_dead_rats(&mut self) -> usize {
        let before = self.rats.len();
        self.rats.retain(|r| r.is_alive());
        before - self.rats.len()
    }
}

impl GridQuery for World {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.get(x, y).copied().unwrap_or(Cell::Empty)
    }

    fn remove_at(&mut self, x: usize, y: usize) {
        self.set(x, y, Cell::Empty);
    }

    fn capture_rat(&mut self, id: u32) -> bool {
        let Some(rat) = self.rats.iter_mut().find(|r| r.id == id && r.is_alive()) else {
            return false;
        };
        rat.die();
        let (x, y) = (rat.x, rat.y);
        if self.get(x, y) == Some(&Cell::Rat { id }) {
            self.set(x, y, Cell::Empty);
        }
        log::debug!("Rat {} died at ({}, {})", id, x, y);
        true
    }
}
