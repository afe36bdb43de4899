use super::{SimulationState, TimedEvent};
use crate::agent::events::AgentEvent;
use chrono::Utc;

impl SimulationState {
    /// Advances the world by one frame: rats relocate, the agent acts, then
    /// the roster drops the rats it caught.
    pub fn tick(&mut self) {
        self.tick += 1;

        self.world.move_rats(&mut self.rng);
        self.agent.tick(&mut self.world, &mut self.rng);

        let visible = self.visible_cells();
        self.exploration.update(&visible, &self.world);

        let pruned = self.world.prune_dead_rats();
        if pruned > 0 {
            log::debug!("Removed {} dead rats from the roster", pruned);
        }

        self.record_events();
    }

    fn record_events(&mut self) {
        let now = Utc::now();
        for event in self.agent.drain_events() {
            log_event(self.tick, &event);
            if self.event_history == 0 {
                continue;
            }
            if self.recent_events.len() >= self.event_history {
                self.recent_events.pop_front();
            }
            self.recent_events.push_back(TimedEvent {
                tick: self.tick,
                at: now,
                event,
            });
        }
    }
}

fn log_event(tick: u64, event: &AgentEvent) {
    let level = if event.is_milestone() {
        log::Level::Info
    } else {
        log::Level::Debug
    };
    if log::log_enabled!(level) {
        log::log!(level, "Tick {}: {}", tick, describe(event));
    }
}

fn describe(event: &AgentEvent) -> String {
    match event {
        AgentEvent::TargetConsumed { target } => format!(
            "ate {:?} {} at ({}, {})",
            target.kind, target.entity, target.x, target.y
        ),
        AgentEvent::PhaseChanged { from, to } => format!("phase {} -> {}", from, to),
        AgentEvent::BushesReset => "every bush visited, progress reset".to_string(),
        other => format!("{:?}", other),
    }
}
