use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive rectangle a rat relocates within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolBox {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl PatrolBox {
    /// Square of `radius` around (x, y), clipped to a `width` x `height` grid.
    pub fn around(x: usize, y: usize, radius: usize, width: usize, height: usize) -> Self {
        Self {
            x_min: x.saturating_sub(radius),
            x_max: (x + radius).min(width.saturating_sub(1)),
            y_min: y.saturating_sub(radius),
            y_max: (y + radius).min(height.saturating_sub(1)),
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y_min..=self.y_max).flat_map(move |y| (self.x_min..=self.x_max).map(move |x| (x, y)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rat {
    pub id: u32,
    pub x: usize,
    pub y: usize,
    pub patrol: PatrolBox,
    alive: bool,
}

impl Rat {
    pub fn new(id: u32, x: usize, y: usize, patrol: PatrolBox) -> Self {
        Self {
            id,
            x,
            y,
            patrol,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Picks a uniformly random patrol cell that `is_free` accepts and jumps
    /// there. Dead rats and rats with no free cell stay put.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R, is_free: impl Fn(usize, usize) -> bool) -> bool {
        if !self.alive {
            return false;
        }

        let candidates: Vec<(usize, usize)> = self
            .patrol
            .cells()
            .filter(|&(x, y)| (x, y) == (self.x, self.y) || is_free(x, y))
            .collect();

        match candidates.choose(rng) {
            Some(&(x, y)) => {
                self.x = x;
                self.y = y;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_patrol_box_clipped() {
        let patrol = PatrolBox::around(1, 2, 4, 10, 13);
        assert_eq!(patrol.x_min, 0);
        assert_eq!(patrol.x_max, 5);
        assert_eq!(patrol.y_min, 0);
        assert_eq!(patrol.y_max, 6);
        assert_eq!(patrol.cells().count(), 6 * 7);
    }

    #[test]
    fn test_relocate_stays_in_patrol() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rat = Rat::new(0, 5, 5, PatrolBox::around(5, 5, 2, 20, 20));

        for _ in 0..200 {
            assert!(rat.relocate(&mut rng, |_, _| true));
            assert!(rat.patrol.contains(rat.x, rat.y));
        }
    }

    #[test]
    fn test_relocate_respects_occupancy() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rat = Rat::new(0, 5, 5, PatrolBox::around(5, 5, 1, 20, 20));

        for _ in 0..50 {
            rat.relocate(&mut rng, |x, y| x == 6 && y == 6);
            assert!((rat.x, rat.y) == (5, 5) || (rat.x, rat.y) == (6, 6));
        }
    }

    #[test]
    fn test_dead_rat_does_not_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rat = Rat::new(0, 5, 5, PatrolBox::around(5, 5, 4, 20, 20));
        rat.die();

        assert!(!rat.is_alive());
        assert!(!rat.relocate(&mut rng, |_, _| true));
        assert_eq!((rat.x, rat.y), (5, 5));
    }
}
