use super::cell::{BushColor, Cell};
use super::{grid_height_for, World};

/// Column of the wall splitting the world in two halves.
pub fn separator_column(width: usize) -> usize {
    width / 2
}

/// The single row on which the separator can be crossed.
pub fn crossing_row(height: usize) -> usize {
    height / 2
}

/// Half-open x range of the bridge drawn over the crossing row.
pub fn crossing_span(width: usize) -> (usize, usize) {
    let bridge_width = width / 5;
    let start = (width - bridge_width) / 2;
    (start, start + bridge_width)
}

const BUSH_LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

impl World {
    /// Standard arena: separator wall with one bridge, six two-cell bushes on
    /// the outer columns, three food items and two patrolling rats.
    pub fn with_layout(grid_size: usize, rat_patrol_radius: usize) -> Self {
        let mut world = World::new(grid_size, grid_height_for(grid_size));
        world.build_separator();
        world.build_bridge();
        world.build_bushes();
        world.build_food();
        world.build_rats(rat_patrol_radius);
        world
    }

    fn build_separator(&mut self) {
        let x = separator_column(self.width());
        let bridge_y = crossing_row(self.height());
        for y in (0..self.height()).filter(|&y| y != bridge_y) {
            self.set(x, y, Cell::Separator);
        }
    }

    fn build_bridge(&mut self) {
        let y = crossing_row(self.height());
        let (start, end) = crossing_span(self.width());
        for x in start..end {
            self.set(x, y, Cell::Bridge);
        }
    }

    fn build_bushes(&mut self) {
        let (w, h) = (self.width(), self.height());
        let positions = [
            (w / 8, h / 6),
            (w / 8, h / 2),
            (w / 8, 5 * h / 6),
            (7 * w / 8, h / 6),
            (7 * w / 8, h / 2),
            (7 * w / 8, 5 * h / 6),
        ];

        for ((&(x, y), color), label) in positions.iter().zip(BushColor::ALL).zip(BUSH_LABELS) {
            let id = self.register_bush(label, color);
            self.place_bush(x, y, id);
            self.place_bush(x + 1, y, id);
        }
    }

    fn build_food(&mut self) {
        let (w, h) = (self.width(), self.height());
        for (x, y) in [(w / 4, h / 2), (3 * w / 4, h / 2), (w / 8, 3 * h / 4)] {
            if self.get(x, y).map(|c| c.is_empty()).unwrap_or(false) {
                self.spawn_food(x, y);
            }
        }
    }

    fn build_rats(&mut self, patrol_radius: usize) {
        let (w, h) = (self.width(), self.height());
        for (x, y) in [(7 * w / 8, h / 4), (3 * w / 4, 3 * h / 4)] {
            if self.get(x, y).map(|c| c.is_empty()).unwrap_or(false) {
                self.spawn_rat(x, y, patrol_radius);
            }
        }
    }
}
