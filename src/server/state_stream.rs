use super::protocol::ServerMessage;
use crate::simulation::SimulationState;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-only view of the running simulation.
#[derive(Clone)]
pub struct StateStream {
    state: Arc<RwLock<SimulationState>>,
}

impl StateStream {
    pub fn new(state: Arc<RwLock<SimulationState>>) -> Self {
        Self { state }
    }

    pub async fn update(&self) -> ServerMessage {
        ServerMessage::update(&*self.state.read().await)
    }

    pub async fn full_state(&self) -> ServerMessage {
        ServerMessage::full_state(&*self.state.read().await)
    }
}
