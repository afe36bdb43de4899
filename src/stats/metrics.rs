use crate::agent::phase::Phase;
use crate::agent::vision::Facing;
use crate::agent::Agent;
use crate::world::World;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub tick: u64,
    pub agent_x: usize,
    pub agent_y: usize,
    pub facing: Facing,
    pub phase: Phase,
    pub stress_vision: bool,
    pub stress_level: f64,
    pub chasing: bool,
    pub bushes_completed: usize,
    pub bushes_total: usize,
    pub rats_alive: usize,
    pub food_remaining: usize,
    pub explored: f64,
}

impl SimulationMetrics {
    pub fn compute(tick: u64, agent: &Agent, world: &World, explored: f64) -> Self {
        let position = agent.position();

        Self {
            tick,
            agent_x: position.x,
            agent_y: position.y,
            facing: agent.facing(),
            phase: agent.phase(),
            stress_vision: agent.stress_vision(),
            stress_level: agent.pools().stress(),
            chasing: agent.chase_target().is_some(),
            bushes_completed: agent.bushes().completed(),
            bushes_total: agent.bushes().len(),
            rats_alive: world.live_rats().count(),
            food_remaining: world.food_remaining(),
            explored,
        }
    }

    /// Nothing left to hunt.
    pub fn prey_exhausted(&self) -> bool {
        self.rats_alive == 0 && self.food_remaining == 0 && !self.chasing
    }
}
