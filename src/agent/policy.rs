use super::events::{AgentEvent, TurnReason};
use super::phase::LookStrategy;
use super::Agent;
use crate::world::cell::TargetKind;
use crate::world::GridQuery;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CARDINAL_MOVES: [(i64, i64); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Random walk used while roaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStyle {
    /// Two shuffled cardinal steps, looking around after each.
    Cardinal,
    /// Four free steps drifting mostly forward (+y).
    Biased,
}

/// One unit step along the dominant axis of (dx, dy), or None when already
/// there. `ties_horizontal` picks the axis when |dx| == |dy|.
fn step_toward(dx: i64, dy: i64, ties_horizontal: bool) -> Option<(i64, i64)> {
    if dx == 0 && dy == 0 {
        return None;
    }
    let horizontal = if ties_horizontal {
        dx.abs() >= dy.abs()
    } else {
        dx.abs() > dy.abs()
    };
    if horizontal {
        Some((dx.signum(), 0))
    } else {
        Some((0, dy.signum()))
    }
}

impl Agent {
    /// Moves by (dx, dy) if the collision gate allows it.
    pub fn try_step(&mut self, dx: i64, dy: i64) -> bool {
        let (x, y) = self.position.offset(dx, dy);
        self.gate.apply(&mut self.position, x, y)
    }

    /// Free movement when nothing is being chased: usually head for a bush,
    /// otherwise wander.
    pub fn roam<G: GridQuery, R: Rng>(&mut self, grid: &G, rng: &mut R) {
        if rng.gen_bool(self.bush_seek_probability) {
            self.seek_bush(grid);
            return;
        }
        match self.walk {
            WalkStyle::Cardinal => self.cardinal_walk(grid, rng),
            WalkStyle::Biased => self.biased_walk(rng),
        }
    }

    /// Up to four steps. x drifts uniformly; y goes forward whenever the draw
    /// is positive and on half of the zero draws, back only on a negative draw.
    pub fn biased_walk<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..4 {
            let dx = rng.gen_range(-1..=1);
            let mut dy: i64 = rng.gen_range(-1..=1);
            if dy > 0 || (dy == 0 && rng.gen_bool(0.5)) {
                dy = 1;
            } else if dy < 0 {
                dy = -1;
            }
            self.try_step(dx, dy);
        }
    }

    /// Two rounds of: take the first allowed move out of a shuffled cardinal
    /// set, then look around. Stops as soon as something is spotted.
    pub fn cardinal_walk<G: GridQuery, R: Rng>(&mut self, grid: &G, rng: &mut R) {
        for _ in 0..2 {
            let mut moves = CARDINAL_MOVES;
            moves.shuffle(rng);
            for (dx, dy) in moves {
                if self.try_step(dx, dy) {
                    break;
                }
            }

            self.scan(grid);
            if self.chase.is_some() {
                break;
            }
        }
    }

    /// One step toward the nearest unfinished bush. Returns whether the agent moved.
    pub fn seek_bush<G: GridQuery>(&mut self, grid: &G) -> bool {
        let (x, y) = (self.position.x, self.position.y);
        let Some((bx, by)) = self.bushes.find_nearest_incomplete(x, y, grid) else {
            return false;
        };
        match step_toward(bx as i64 - x as i64, by as i64 - y as i64, true) {
            Some((dx, dy)) => self.try_step(dx, dy),
            None => false,
        }
    }

    /// One step toward the chase target, eating it on arrival. A target
    /// spotted under the agent this tick is eaten on the next one.
    pub fn chase_step<G: GridQuery>(&mut self, grid: &mut G) {
        let Some(target) = self.chase else {
            return;
        };

        let (dx, dy) = (
            target.x as i64 - self.position.x as i64,
            target.y as i64 - self.position.y as i64,
        );
        let Some((sx, sy)) = step_toward(dx, dy, false) else {
            if target.spotted_at < self.clock {
                self.consume(grid);
            }
            return;
        };

        let moved = self.try_step(sx, sy) || {
            // Blocked on the preferred axis: try the other one.
            let (ax, ay) = if sx != 0 { (0, dy.signum()) } else { (dx.signum(), 0) };
            (ax, ay) != (0, 0) && self.try_step(ax, ay)
        };

        if moved && (self.position.x, self.position.y) == (target.x, target.y) {
            self.consume(grid);
        }
    }

    /// Eats the chase target at its cell. If it is gone already the target
    /// is dropped without credit.
    fn consume<G: GridQuery>(&mut self, grid: &mut G) {
        let Some(target) = self.chase.take() else {
            return;
        };

        if grid.cell_at(target.x, target.y).target() != Some((target.kind, target.entity)) {
            self.events.push(AgentEvent::TargetLost { target });
            self.set_stress_vision(false);
            return;
        }

        grid.remove_at(target.x, target.y);
        if target.kind == TargetKind::Rat {
            grid.capture_rat(target.entity);
        }
        self.pools.drain_for(target.kind);
        self.events.push(AgentEvent::TargetConsumed { target });

        if let Some((from, to)) = self.phase.on_consumed(target.kind) {
            self.events.push(AgentEvent::PhaseChanged { from, to });
        }
        if target.kind == TargetKind::Rat {
            self.set_stress_vision(false);
        }
        if matches!(self.look, LookStrategy::PhaseBased { .. }) {
            self.turn(self.facing.clockwise(), TurnReason::Meal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::chem::STRESS;
    use crate::agent::collision::Position;
    use crate::agent::phase::Phase;
    use crate::agent::vision::Facing;
    use crate::config::AgentConfig;
    use crate::world::cell::{BushColor, Cell};
    use crate::world::World;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent_in(world: &World, x: usize, y: usize, config: &AgentConfig) -> Agent {
        Agent::new(
            Position::new(x, y),
            world.bushes(),
            (world.width(), world.height()),
            config,
            5,
        )
    }

    #[test]
    fn test_step_toward() {
        assert_eq!(step_toward(3, 1, false), Some((1, 0)));
        assert_eq!(step_toward(-1, -3, false), Some((0, -1)));
        assert_eq!(step_toward(2, 2, false), Some((0, 1)));
        assert_eq!(step_toward(2, 2, true), Some((1, 0)));
        assert_eq!(step_toward(0, 0, true), None);
    }

    #[test]
    fn test_biased_walk_stays_legal() {
        let world = World::new(10, 13);
        let mut rng = StdRng::seed_from_u64(5);
        let mut agent = agent_in(&world, 2, 2, &AgentConfig::default());

        for _ in 0..200 {
            agent.biased_walk(&mut rng);
            let Position { x, y } = agent.position();
            assert!(agent.gate().is_valid_move(x as i64, y as i64));
        }
    }

    #[test]
    fn test_biased_walk_drifts_forward() {
        // Net drift is +1/6 cell per step, so 1000 steps land far below the start.
        let world = World::new(10, 2000);
        let mut rng = StdRng::seed_from_u64(9);
        let mut agent = agent_in(&world, 2, 0, &AgentConfig::default());

        for _ in 0..250 {
            agent.biased_walk(&mut rng);
        }
        assert!(agent.position().y > 50);
    }

    #[test]
    fn test_cardinal_walk_moves_one_cell_per_round() {
        let world = World::new(20, 20);
        let mut rng = StdRng::seed_from_u64(2);
        let mut agent = agent_in(&world, 3, 3, &AgentConfig::default());

        agent.cardinal_walk(&world, &mut rng);
        let Position { x, y } = agent.position();
        let distance = (x as i64 - 3).abs() + (y as i64 - 3).abs();
        assert!(distance == 0 || distance == 2);
    }

    #[test]
    fn test_cardinal_walk_stops_on_sighting() {
        let mut world = World::new(20, 20);
        world.spawn_food(3, 0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut agent = agent_in(&world, 3, 3, &AgentConfig::default());

        agent.cardinal_walk(&world, &mut rng);
        assert!(agent.chase_target().is_some());
        let Position { x, y } = agent.position();
        assert_eq!((x as i64 - 3).abs() + (y as i64 - 3).abs(), 1);
    }

    #[test]
    fn test_seek_bush_prefers_horizontal_on_tie() {
        let mut world = World::new(20, 20);
        let a = world.register_bush("A", BushColor::Green);
        world.place_bush(8, 8, a);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());

        assert!(agent.seek_bush(&world));
        assert_eq!(agent.position(), Position::new(6, 5));
    }

    #[test]
    fn test_seek_bush_without_bushes() {
        let world = World::new(20, 20);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());
        assert!(!agent.seek_bush(&world));
        assert_eq!(agent.position(), Position::new(5, 5));
    }

    #[test]
    fn test_seek_bush_blocked_by_separator() {
        let mut world = World::new(10, 13);
        let a = world.register_bush("A", BushColor::Green);
        world.place_bush(8, 2, a);
        let mut agent = agent_in(&world, 4, 2, &AgentConfig::default());

        assert!(!agent.seek_bush(&world));
        assert_eq!(agent.position(), Position::new(4, 2));
    }

    #[test]
    fn test_chase_eats_food_on_arrival() {
        let mut world = World::new(20, 20);
        world.spawn_food(5, 4);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());
        agent.scan(&world);
        assert_eq!(agent.pools().value(STRESS), 1.0);

        agent.chase_step(&mut world);

        assert_eq!(agent.position(), Position::new(5, 4));
        assert!(agent.chase_target().is_none());
        assert_eq!(world.cell_at(5, 4), Cell::Empty);
        assert_eq!(agent.pools().stress(), 0.0);
        assert_eq!(agent.phase(), Phase::OneB);
        assert_eq!(agent.facing(), Facing::Right);
    }

    #[test]
    fn test_chase_detours_around_wall() {
        let mut world = World::new(10, 13);
        world.spawn_food(7, 4);
        let mut agent = agent_in(&world, 4, 6, &AgentConfig::default());
        agent.scan(&world);
        assert!(agent.chase_target().is_some());

        agent.chase_step(&mut world);
        assert_eq!(agent.position(), Position::new(5, 6));

        agent.chase_step(&mut world);
        assert_eq!(agent.position(), Position::new(6, 6));
    }

    #[test]
    fn test_lost_target_gets_no_credit() {
        let mut world = World::new(20, 20);
        world.spawn_rat(5, 4, 0);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());
        agent.scan(&world);
        assert!(agent.stress_vision());

        world.remove_at(5, 4);
        agent.chase_step(&mut world);

        assert!(agent.chase_target().is_none());
        assert!(!agent.stress_vision());
        assert_eq!(agent.phase(), Phase::OneA);
        assert_eq!(agent.pools().stress(), 5.0);
        assert!(agent
            .drain_events()
            .iter()
            .any(|e| matches!(e, AgentEvent::TargetLost { .. })));
    }

    #[test]
    fn test_target_underfoot_waits_a_tick() {
        let mut world = World::new(20, 20);
        world.spawn_food(5, 5);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());
        agent.clock = 1;
        agent.scan(&world);

        agent.chase_step(&mut world);
        assert!(agent.chase_target().is_some());

        agent.clock = 2;
        agent.chase_step(&mut world);
        assert!(agent.chase_target().is_none());
        assert!(world.cell_at(5, 5).is_empty());
    }
}
