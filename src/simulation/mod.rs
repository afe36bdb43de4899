pub mod tick;

use crate::agent::collision::Position;
use crate::agent::events::AgentEvent;
use crate::agent::Agent;
use crate::config::Config;
use crate::stats::{ExplorationMap, SimulationMetrics};
use crate::world::World;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedEvent {
    pub tick: u64,
    pub at: DateTime<Utc>,
    pub event: AgentEvent,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub world: World,
    pub agent: Agent,
    pub exploration: ExplorationMap,
    pub tick: u64,
    pub recent_events: VecDeque<TimedEvent>,
    event_history: usize,
    rng: StdRng,
}

impl SimulationState {
    pub fn new(config: &Config) -> Self {
        let world = World::with_layout(config.world.grid_size, config.rat.patrol_radius);
        let start = Position::new(
            config
                .agent
                .start_x
                .unwrap_or(world.width() / 4)
                .min(world.width() - 1),
            config
                .agent
                .start_y
                .unwrap_or(world.height() - 1)
                .min(world.height() - 1),
        );

        log::info!(
            "World {}x{} with {} bushes, {} food, {} rats; agent starts at ({}, {})",
            world.width(),
            world.height(),
            world.bushes().len(),
            world.food_remaining(),
            world.rats().len(),
            start.x,
            start.y
        );

        Self::from_world(world, start, config)
    }

    /// Runs the agent in a prepared world.
    pub fn from_world(world: World, start: Position, config: &Config) -> Self {
        let agent = Agent::new(
            start,
            world.bushes(),
            (world.width(), world.height()),
            &config.agent,
            config.simulation.ticks_per_second,
        );
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            exploration: ExplorationMap::new(world.width(), world.height()),
            world,
            agent,
            tick: 0,
            recent_events: VecDeque::new(),
            event_history: config.simulation.event_history,
            rng,
        }
    }

    pub fn metrics(&self) -> SimulationMetrics {
        let explored = self.exploration.coverage(&self.world);
        SimulationMetrics::compute(self.tick, &self.agent, &self.world, explored)
    }

    pub fn visible_cells(&self) -> Vec<(usize, usize)> {
        self.agent
            .visible_cells((self.world.width(), self.world.height()))
    }
}
