use crate::agent::phase::Phase;
use crate::agent::vision::{ChaseTarget, Facing};
use crate::simulation::{SimulationState, TimedEvent};
use crate::stats::SimulationMetrics;
use crate::world::cell::Cell;
use crate::world::rat::Rat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "update")]
    Update {
        metrics: SimulationMetrics,
        agent: AgentSnapshot,
        rats: Vec<RatSnapshot>,
        vision: Vec<(usize, usize)>,
    },
    #[serde(rename = "full_state")]
    FullState {
        metrics: SimulationMetrics,
        world_width: usize,
        world_height: usize,
        cells: Vec<CellSnapshot>,
        agent: AgentSnapshot,
        rats: Vec<RatSnapshot>,
        bushes: Vec<BushSnapshot>,
        vision: Vec<(usize, usize)>,
        events: Vec<TimedEvent>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub x: usize,
    pub y: usize,
    pub facing: Facing,
    pub phase: Phase,
    pub stress_vision: bool,
    pub chase: Option<ChaseTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatSnapshot {
    pub id: u32,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: usize,
    pub y: usize,
    pub cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BushSnapshot {
    pub label: String,
    pub rgb: (u8, u8, u8),
    pub progress: u8,
}

impl From<&Rat> for RatSnapshot {
    fn from(rat: &Rat) -> Self {
        Self {
            id: rat.id,
            x: rat.x,
            y: rat.y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "get_state")]
    GetState,
}

fn agent_snapshot(state: &SimulationState) -> AgentSnapshot {
    let agent = &state.agent;
    let position = agent.position();
    AgentSnapshot {
        x: position.x,
        y: position.y,
        facing: agent.facing(),
        phase: agent.phase(),
        stress_vision: agent.stress_vision(),
        chase: agent.chase_target(),
    }
}

impl ServerMessage {
    pub fn update(state: &SimulationState) -> Self {
        ServerMessage::Update {
            metrics: state.metrics(),
            agent: agent_snapshot(state),
            rats: state.world.live_rats().map(RatSnapshot::from).collect(),
            vision: state.visible_cells(),
        }
    }

    pub fn full_state(state: &SimulationState) -> Self {
        let cells = state
            .world
            .occupied_cells()
            .map(|(x, y, cell)| CellSnapshot { x, y, cell })
            .collect();
        let bushes = state
            .world
            .bushes()
            .iter()
            .map(|b| BushSnapshot {
                label: b.label.clone(),
                rgb: b.color.rgb(),
                progress: state.agent.bushes().progress(b.id),
            })
            .collect();

        ServerMessage::FullState {
            metrics: state.metrics(),
            world_width: state.world.width(),
            world_height: state.world.height(),
            cells,
            agent: agent_snapshot(state),
            rats: state.world.live_rats().map(RatSnapshot::from).collect(),
            bushes,
            vision: state.visible_cells(),
            events: state.recent_events.iter().cloned().collect(),
        }
    }
}
