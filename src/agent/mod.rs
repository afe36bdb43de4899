pub mod bush;
pub mod chem;
pub mod collision;
pub mod events;
pub mod phase;
pub mod policy;
pub mod vision;

use crate::config::{AgentConfig, LookStrategyKind};
use crate::world::cell::TargetKind;
use crate::world::{BushInfo, GridQuery};
use bush::BushTracker;
use chem::{ChemicalPools, STRESS};
use collision::{CollisionGate, Position};
use events::{AgentEvent, TurnReason};
use phase::{side_of, zone_of, LookStrategy, Phase, PhaseMachine};
use policy::WalkStyle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vision::{ChaseTarget, Facing, Vision, VisionRanges};

/// The predator. Owns its perception, internal signals and phase state and
/// advances them together, one tick at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    position: Position,
    facing: Facing,
    vision: Vision,
    phase: PhaseMachine,
    look: LookStrategy,
    bushes: BushTracker,
    pools: ChemicalPools,
    gate: CollisionGate,
    chase: Option<ChaseTarget>,
    walk: WalkStyle,
    bush_seek_probability: f64,
    proximity_stress_radius: Option<usize>,
    clock: u64,
    last_turn: u64,
    #[serde(skip)]
    events: Vec<AgentEvent>,
}

impl Agent {
    pub fn new(
        start: Position,
        bushes: &[BushInfo],
        dimensions: (usize, usize),
        config: &AgentConfig,
        ticks_per_second: u64,
    ) -> Self {
        let ranges = VisionRanges {
            base_size: config.base_vision,
            stress_size: config.stress_vision,
            forward_length: config.forward_vision,
        };
        let look = match config.look_strategy {
            LookStrategyKind::PhaseBased => LookStrategy::PhaseBased {
                orient_every: seconds_to_ticks(config.orient_interval_secs, ticks_per_second),
            },
            LookStrategyKind::TimedRotation => LookStrategy::TimedRotation {
                rotate_every: seconds_to_ticks(config.rotation_interval_secs, ticks_per_second),
            },
        };

        Self {
            position: start,
            facing: Facing::Up,
            vision: Vision::new(ranges),
            phase: PhaseMachine::new(),
            look,
            bushes: BushTracker::new(bushes, config.bush_radius),
            pools: ChemicalPools::new(),
            gate: CollisionGate::new(dimensions.0, dimensions.1),
            chase: None,
            walk: config.walk_style,
            bush_seek_probability: config.bush_seek_probability.clamp(0.0, 1.0),
            proximity_stress_radius: config.proximity_stress_radius,
            clock: 0,
            last_turn: 0,
            events: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    pub fn stress_vision(&self) -> bool {
        self.vision.stress_mode()
    }

    pub fn chase_target(&self) -> Option<ChaseTarget> {
        self.chase
    }

    pub fn pools(&self) -> &ChemicalPools {
        &self.pools
    }

    pub fn bushes(&self) -> &BushTracker {
        &self.bushes
    }

    pub fn gate(&self) -> &CollisionGate {
        &self.gate
    }

    pub fn look_strategy(&self) -> LookStrategy {
        self.look
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn visible_cells(&self, dimensions: (usize, usize)) -> Vec<(usize, usize)> {
        self.vision
            .cells(self.position.x, self.position.y, self.facing, dimensions)
    }

    pub fn drain_events(&mut self) -> Vec<AgentEvent> {
        std::mem::take(&mut self.events)
    }

    /// One simulation step: look, update phase and heading, move, then
    /// check for nearby bushes.
    pub fn tick<G: GridQuery, R: Rng>(&mut self, grid: &mut G, rng: &mut R) {
        self.clock += 1;

        if let Some(radius) = self.proximity_stress_radius {
            self.pools
                .sense_surroundings(&*grid, self.position.x, self.position.y, radius);
        }

        self.scan(&*grid);
        self.update_heading(&*grid);

        if self.chase.is_some() {
            self.chase_step(grid);
        } else {
            self.roam(&*grid, rng);
        }

        let Position { x, y } = self.position;
        if let Some(credit) = self.bushes.check_proximity(x, y, &*grid, &mut self.pools) {
            self.events.push(AgentEvent::BushVisited {
                bush: credit.bush,
                progress: credit.progress,
            });
            if credit.reset {
                self.events.push(AgentEvent::BushesReset);
            }
        }
    }

    /// Looks for food or rats. The first one in sight becomes the chase
    /// target. Every pass that sees one raises stress, and a rat switches on
    /// stress vision.
    pub fn scan<G: GridQuery>(&mut self, grid: &G) -> Option<ChaseTarget> {
        let found = self
            .vision
            .first_target(self.position.x, self.position.y, self.facing, grid);

        let Some((x, y, kind, entity)) = found else {
            if self.chase.is_none() {
                self.set_stress_vision(false);
            }
            return None;
        };

        let target = match self.chase {
            Some(current) if current.same_entity(kind, entity) => ChaseTarget { x, y, ..current },
            _ => {
                let target = ChaseTarget {
                    x,
                    y,
                    kind,
                    entity,
                    spotted_at: self.clock,
                };
                self.events.push(AgentEvent::TargetSpotted { target });
                target
            }
        };

        self.pools.add(STRESS, kind.stress());
        self.chase = Some(target);
        if kind == TargetKind::Rat {
            self.set_stress_vision(true);
        }
        Some(target)
    }

    fn update_heading<G: GridQuery>(&mut self, grid: &G) {
        if self.vision.stress_mode() {
            return;
        }

        match self.look {
            LookStrategy::PhaseBased { orient_every } => {
                if self.clock - self.last_turn >= orient_every {
                    self.last_turn = self.clock;
                    self.face_nearest_bush(grid);
                }

                if self.chase.is_none() {
                    let (width, height) = grid.dimensions();
                    let zone = zone_of(self.position.y, height);
                    let side = side_of(self.position.x, width);
                    if self.phase.observe_position(zone, side) {
                        self.events.push(AgentEvent::PhaseChanged {
                            from: Phase::OneB,
                            to: Phase::Two,
                        });
                        self.turn(self.facing.clockwise(), TurnReason::PhaseChange);
                    }
                }
            }
            LookStrategy::TimedRotation { rotate_every } => {
                if self.clock - self.last_turn >= rotate_every {
                    self.last_turn = self.clock;
                    self.turn(self.facing.clockwise(), TurnReason::Timer);
                }
            }
        }
    }

    fn face_nearest_bush<G: GridQuery>(&mut self, grid: &G) {
        let Position { x, y } = self.position;
        if let Some((bx, by)) = self.bushes.find_nearest_incomplete(x, y, grid) {
            let facing = Facing::toward(bx as i64 - x as i64, by as i64 - y as i64);
            self.turn(facing, TurnReason::NearestBush);
        }
    }

    fn turn(&mut self, facing: Facing, reason: TurnReason) {
        if self.facing != facing {
            self.facing = facing;
            self.events.push(AgentEvent::Turned { facing, reason });
        }
    }

    fn set_stress_vision(&mut self, active: bool) {
        if self.vision.set_stress_mode(active) {
            self.events.push(AgentEvent::StressVision { active });
        }
    }
}

/// Converts a simulated duration to a whole number of ticks, at least one.
pub fn seconds_to_ticks(seconds: f64, ticks_per_second: u64) -> u64 {
    ((seconds * ticks_per_second as f64).round() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::cell::BushColor;
    use crate::world::World;

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
    fn test_agent_creation() {
        let world = World::with_layout(64, 4);
        let agent = agent_in(&world, 16, 82, &AgentConfig::default());

        assert_eq!(agent.position(), Position::new(16, 82));
        assert_eq!(agent.facing(), Facing::Up);
        assert_eq!(agent.phase(), Phase::OneA);
        assert!(!agent.stress_vision());
        assert!(agent.chase_target().is_none());
        assert_eq!(agent.bushes().len(), 6);
        assert_eq!(agent.look_strategy(), LookStrategy::PhaseBased { orient_every: 25 });
    }

    #[test]
    fn test_scan_spots_food() {
        let mut world = World::new(20, 20);
        let food = world.spawn_food(5, 3);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());

        let target = agent.scan(&world).unwrap();
        assert_eq!((target.x, target.y, target.kind, target.entity), (5, 3, TargetKind::Food, food));
        assert_eq!(agent.pools().stress(), 1.0);
        assert!(!agent.stress_vision());
    }

    #[test]
    fn test_every_sighting_adds_stress() {
        let mut world = World::new(20, 26);
        let rat = world.spawn_rat(5, 7, 0);
        let mut agent = agent_in(&world, 5, 10, &AgentConfig::default());

        for expected in [5.0, 10.0, 15.0] {
            let target = agent.scan(&world).unwrap();
            assert_eq!(target.entity, rat);
            assert_eq!(agent.pools().stress(), expected);
        }
        assert!(agent.stress_vision());
        let spotted = agent
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, AgentEvent::TargetSpotted { .. }))
            .count();
        assert_eq!(spotted, 1);
    }

    #[test]
    fn test_stress_vision_clears_without_target() {
        let mut world = World::new(20, 20);
        world.spawn_rat(5, 3, 0);
        let mut agent = agent_in(&world, 5, 5, &AgentConfig::default());
        agent.scan(&world);
        assert!(agent.stress_vision());

        world.remove_at(5, 3);
        agent.scan(&world);
        assert!(agent.stress_vision(), "still chasing, stress vision stays");

        agent.chase = None;
        agent.scan(&world);
        assert!(!agent.stress_vision());
    }

    #[test]
    fn test_timed_orientation_faces_bush() {
        let mut world = World::new(30, 30);
        let a = world.register_bush("A", BushColor::Green);
        world.place_bush(25, 6, a);
        let mut config = AgentConfig::default();
        config.orient_interval_secs = 1.0;
        let mut agent = agent_in(&world, 5, 5, &config);

        for _ in 0..5 {
            agent.clock += 1;
            agent.update_heading(&world);
        }
        assert_eq!(agent.facing(), Facing::Right);
    }

    #[test]
    fn test_timed_rotation_strategy() {
        let world = World::new(30, 30);
        let mut config = AgentConfig::default();
        config.look_strategy = LookStrategyKind::TimedRotation;
        config.rotation_interval_secs = 1.0;
        let mut agent = agent_in(&world, 5, 5, &config);

        for _ in 0..10 {
            agent.clock += 1;
            agent.update_heading(&world);
        }
        assert_eq!(agent.facing(), Facing::Down);
    }

    #[test]
    fn test_no_heading_change_in_stress_mode() {
        let world = World::new(30, 30);
        let mut config = AgentConfig::default();
        config.look_strategy = LookStrategyKind::TimedRotation;
        config.rotation_interval_secs = 0.2;
        let mut agent = agent_in(&world, 5, 5, &config);
        agent.set_stress_vision(true);

        for _ in 0..10 {
            agent.clock += 1;
            agent.update_heading(&world);
        }
        assert_eq!(agent.facing(), Facing::Up);
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(5.0, 5), 25);
        assert_eq!(seconds_to_ticks(0.0, 5), 1);
        assert_eq!(seconds_to_ticks(0.5, 3), 2);
    }
}
